use crate::application::auth::Session;
use crate::application::client::Client;
use crate::application::interfaces::portfolio::PortfolioService;
use crate::application::interfaces::product::ProductService;
use crate::error::AppError;
use crate::model::utils::update_section_rows;
use crate::presentation::portfolio::{
    CashBalance, Portfolio, Position, PositionType, TotalPortfolio, position_row_kind,
};
use async_trait::async_trait;
use tracing::{debug, info};

#[async_trait]
impl PortfolioService for Client {
    async fn get_portfolio(&self, session: &Session) -> Result<Portfolio, AppError> {
        info!("Getting portfolio");
        let response = self.webapi().get_portfolio(session).await?;
        let rows = update_section_rows("Position", &response, "portfolio")?;

        let mut cash = Vec::new();
        let mut product_rows = Vec::new();
        for row in rows {
            match position_row_kind(&row)? {
                (_, PositionType::Cash) => cash.push(CashBalance::from_row(&row)?),
                (id, PositionType::Product) => product_rows.push((id, row)),
            }
        }

        let ids: Vec<String> = product_rows.iter().map(|(id, _)| id.clone()).collect();
        let products = self.get_products_info(session, &ids).await?;

        let positions = product_rows
            .iter()
            .zip(products)
            .map(|((_, row), product)| Position::from_row(row, product))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            "Portfolio obtained: {} positions, {} cash rows",
            positions.len(),
            cash.len()
        );
        Ok(Portfolio { positions, cash })
    }

    async fn get_portfolio_total(&self, session: &Session) -> Result<TotalPortfolio, AppError> {
        info!("Getting portfolio totals");
        let response = self.webapi().get_portfolio_total(session).await?;
        Ok(TotalPortfolio::from_json(&response)?)
    }
}
