use crate::application::auth::Session;
use crate::application::client::Client;
use crate::application::interfaces::order::OrderService;
use crate::error::AppError;
use crate::model::requests::OrderRequest;
use crate::model::utils::update_section_rows;
use crate::presentation::order::{
    Order, OrderCheck, OrderConfirmation, Transaction, orders_from_history,
    transactions_from_report,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{debug, info};

#[async_trait]
impl OrderService for Client {
    async fn get_orders(&self, session: &Session) -> Result<Vec<Order>, AppError> {
        info!("Getting working orders");
        let response = self.webapi().get_orders(session).await?;
        let orders = update_section_rows("Order", &response, "orders")?
            .iter()
            .map(Order::from_update_row)
            .collect::<Result<Vec<_>, _>>()?;
        debug!("Working orders obtained: {} orders", orders.len());
        Ok(orders)
    }

    async fn get_orders_history(
        &self,
        session: &Session,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Order>, AppError> {
        info!("Getting order history from {} to {}", from, to);
        let response = self.webapi().get_orders_history(session, from, to).await?;
        let orders = orders_from_history(&response)?;
        debug!("Order history obtained: {} orders", orders.len());
        Ok(orders)
    }

    async fn get_transactions(
        &self,
        session: &Session,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Transaction>, AppError> {
        info!("Getting transactions from {} to {}", from, to);
        let response = self.webapi().get_transactions(session, from, to).await?;
        let transactions = transactions_from_report(&response)?;
        debug!("Transactions obtained: {}", transactions.len());
        Ok(transactions)
    }

    async fn check_order(
        &self,
        session: &Session,
        order: &OrderRequest,
    ) -> Result<OrderCheck, AppError> {
        order.validate()?;
        info!(
            "Checking {} order on product {}",
            order.order_type, order.product_id
        );
        let response = self.webapi().check_order(session, order).await?;
        let check = OrderCheck::from_json(&response)?;
        debug!("Order checked, {} fees", check.transaction_fees.len());
        Ok(check)
    }

    async fn confirm_order(
        &self,
        session: &Session,
        check: &OrderCheck,
        order: &OrderRequest,
    ) -> Result<OrderConfirmation, AppError> {
        order.validate()?;
        info!("Confirming order on product {}", order.product_id);
        let response = self
            .webapi()
            .confirm_order(session, &check.confirmation_id, order)
            .await?;
        let confirmation = OrderConfirmation::from_json(&response)?;
        info!("Order placed: {}", confirmation.order_id);
        Ok(confirmation)
    }
}
