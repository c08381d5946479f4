use crate::application::auth::Session;
use crate::application::client::Client;
use crate::application::interfaces::product::ProductService;
use crate::constants::PRODUCTS_INFO_BATCH_SIZE;
use crate::error::AppError;
use crate::model::requests::{PriceSeriesRequest, SearchQuery};
use crate::presentation::price::{Period, PriceSeries, PriceType, Resolution};
use crate::presentation::product::{Product, products_from_info, products_from_lookup};
use async_trait::async_trait;
use tracing::{debug, info, warn};

#[async_trait]
impl ProductService for Client {
    async fn get_products_info(
        &self,
        session: &Session,
        product_ids: &[String],
    ) -> Result<Vec<Product>, AppError> {
        info!("Getting info for {} products", product_ids.len());
        let mut products = Vec::with_capacity(product_ids.len());
        for batch in product_ids.chunks(PRODUCTS_INFO_BATCH_SIZE) {
            let response = self.webapi().get_products_info(session, batch).await?;
            products.extend(products_from_info(&response, batch)?);
        }
        Ok(products)
    }

    async fn search_product(
        &self,
        session: &Session,
        query: &SearchQuery,
    ) -> Result<Vec<Product>, AppError> {
        info!("Searching products: {:?}", query.by);
        let dictionary = session.dictionary();
        let mut params = query.first_page(dictionary)?;
        let exchange_id = query.exchange_id(dictionary)?;

        let mut found = Vec::new();
        for page in 0..query.max_pages {
            params.offset = page * query.limit;
            let response = self.webapi().search_product(session, &params).await?;
            let products = products_from_lookup(&response)?;
            let page_len = products.len();
            debug!("Search page {} returned {} products", page, page_len);

            found.extend(
                products
                    .into_iter()
                    .filter(|p| query.matches(p, exchange_id.as_deref())),
            );
            if page_len < query.limit {
                return Ok(found);
            }
        }

        warn!(
            "Product search stopped after {} pages, results may be incomplete",
            query.max_pages
        );
        Ok(found)
    }

    async fn get_price_series(
        &self,
        session: &Session,
        product: &Product,
        resolution: Resolution,
        period: Period,
        price_type: PriceType,
    ) -> Result<PriceSeries, AppError> {
        info!(
            "Getting {} series for {} at {} over {}",
            price_type, product.symbol, resolution, period
        );
        let request = PriceSeriesRequest::for_product(product, resolution, period, price_type)?;
        let response = self.webapi().get_price_series(session, &request).await?;
        let series = PriceSeries::from_json(&response, period)?;
        if series.resolution != resolution {
            debug!(
                "Requested resolution {} but the service returned {}",
                resolution, series.resolution
            );
        }
        Ok(series)
    }
}
