use crate::application::auth::Session;
use crate::error::AppError;
use crate::presentation::portfolio::{Portfolio, TotalPortfolio};
use async_trait::async_trait;

/// Interface for the portfolio service
#[async_trait]
pub trait PortfolioService: Send + Sync {
    /// Gets positions, joined with their products, and cash balances
    async fn get_portfolio(&self, session: &Session) -> Result<Portfolio, AppError>;

    /// Gets the account totals
    async fn get_portfolio_total(&self, session: &Session) -> Result<TotalPortfolio, AppError>;
}
