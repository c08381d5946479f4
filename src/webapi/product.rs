use crate::application::auth::Session;
use crate::constants::COMPANY_PROFILE_PATH;
use crate::error::AppError;
use crate::model::requests::{NewsRequest, PriceSeriesRequest, ProductSearchParams};
use crate::model::utils::join_url;
use crate::webapi::WebApi;
use serde_json::Value;
use tracing::{debug, error};

impl WebApi {
    /// Product information for a list of product identifiers
    ///
    /// The response maps each identifier to its product under `data`.
    pub async fn get_products_info(
        &self,
        session: &Session,
        product_ids: &[String],
    ) -> Result<Value, AppError> {
        debug!("Getting info for {} products", product_ids.len());
        let url = join_url(&[&session.config().product_search_url, "v5/products/info"]);
        self.http()
            .post_json(
                &url,
                Some(session.jsessionid()),
                &session.account_query(),
                &product_ids,
            )
            .await
            .inspect_err(|e| error!("Products info failed for {:?}: {}", product_ids, e))
    }

    /// One page of the product lookup
    pub async fn search_product(
        &self,
        session: &Session,
        params: &ProductSearchParams,
    ) -> Result<Value, AppError> {
        let url = join_url(&[&session.config().product_search_url, "v5/products/lookup"]);
        let query = params.to_query(session.int_account(), session.session_id());
        debug!(
            "Product search offset {} limit {} text {:?}",
            params.offset, params.limit, params.search_text
        );
        self.http()
            .get_json(&url, Some(session.jsessionid()), &query)
            .await
    }

    /// Company profile of the issuer of `isin`
    pub async fn get_company_profile(
        &self,
        session: &Session,
        isin: &str,
    ) -> Result<Value, AppError> {
        let url = join_url(&[&self.config().rest_api.base_url, COMPANY_PROFILE_PATH, isin]);
        self.http()
            .get_json(&url, Some(session.jsessionid()), &session.account_query())
            .await
    }

    /// News about the issuer of an ISIN
    ///
    /// Fails with `InvalidInput` when the session has no news service.
    pub async fn get_news_by_company(
        &self,
        session: &Session,
        request: &NewsRequest,
    ) -> Result<Value, AppError> {
        let Some(news_url) = session.config().refinitiv_news_url.as_deref() else {
            return Err(AppError::InvalidInput(
                "session has no news service url".to_string(),
            ));
        };
        let url = join_url(&[news_url, "news-by-company"]);
        self.http()
            .get_json(
                &url,
                Some(session.jsessionid()),
                &request.to_query(session.int_account(), session.session_id()),
            )
            .await
    }

    /// Price series from the charting service
    ///
    /// The charting service is a third party: the session cookie is not sent,
    /// only the client id as user token.
    pub async fn get_price_series(
        &self,
        session: &Session,
        request: &PriceSeriesRequest,
    ) -> Result<Value, AppError> {
        let url = &self.config().rest_api.charting_url;
        let query = request.to_query(session.config().client_id);
        debug!("Price series query: {:?}", query);
        self.http().get_json(url, None, &query).await
    }
}
