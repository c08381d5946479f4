use crate::application::auth::Session;
use crate::error::AppError;
use crate::model::requests::SearchQuery;
use crate::presentation::price::{Period, PriceSeries, PriceType, Resolution};
use crate::presentation::product::Product;
use async_trait::async_trait;

/// Interface for the product service
#[async_trait]
pub trait ProductService: Send + Sync {
    /// Gets products by identifier
    ///
    /// Identifiers are sent in batches of 50. The result follows the order of
    /// `product_ids`; an identifier the server does not know is an error.
    async fn get_products_info(
        &self,
        session: &Session,
        product_ids: &[String],
    ) -> Result<Vec<Product>, AppError>;

    /// Searches products, following pages until a short page or `max_pages`
    async fn search_product(
        &self,
        session: &Session,
        query: &SearchQuery,
    ) -> Result<Vec<Product>, AppError>;

    /// Gets a price series
    ///
    /// # Arguments
    /// * `product` - Product to chart, it must have a charting identifier
    /// * `resolution` - Requested step, e.g. `TimeSpan::PT1M`
    /// * `period` - Requested history, e.g. `TimeSpan::P1D`
    /// * `price_type` - Close prices only or OHLC rows
    ///
    /// # Returns
    /// * The series, whose `resolution` is the one the server actually used
    async fn get_price_series(
        &self,
        session: &Session,
        product: &Product,
        resolution: Resolution,
        period: Period,
        price_type: PriceType,
    ) -> Result<PriceSeries, AppError>;
}
