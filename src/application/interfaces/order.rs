use crate::application::auth::Session;
use crate::error::AppError;
use crate::model::requests::OrderRequest;
use crate::presentation::order::{Order, OrderCheck, OrderConfirmation, Transaction};
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
/// Service for listing, checking and placing orders
///
/// Placing an order takes two calls: [`OrderService::check_order`] returns
/// the fees and a confirmation identifier, which
/// [`OrderService::confirm_order`] then uses to place the same order.
pub trait OrderService: Send + Sync {
    /// Gets the orders currently working
    async fn get_orders(&self, session: &Session) -> Result<Vec<Order>, AppError>;

    /// Gets the order history between two dates, both included
    async fn get_orders_history(
        &self,
        session: &Session,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Order>, AppError>;

    /// Gets executed transactions between two dates, both included
    async fn get_transactions(
        &self,
        session: &Session,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Transaction>, AppError>;

    /// Validates an order locally, then asks the server to check it
    async fn check_order(
        &self,
        session: &Session,
        order: &OrderRequest,
    ) -> Result<OrderCheck, AppError>;

    /// Places an order checked by [`OrderService::check_order`]
    async fn confirm_order(
        &self,
        session: &Session,
        check: &OrderCheck,
        order: &OrderRequest,
    ) -> Result<OrderConfirmation, AppError>;
}
