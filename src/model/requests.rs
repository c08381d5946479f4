use crate::constants::{DEFAULT_CULTURE, DEFAULT_SEARCH_LIMIT, DEFAULT_SEARCH_MAX_PAGES};
use crate::error::AppError;
use crate::presentation::dictionary::{
    CountryLookup, ExchangeDictionary, ExchangeLookup, IndexLookup,
};
use crate::presentation::order::{Action, OrderType, TimeType};
use crate::presentation::price::{Period, PriceType, Resolution};
use crate::presentation::product::{Product, ProductTypeId, VwdIdentifierType};
use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Order to check and then confirm
#[derive(DebugPretty, DisplaySimple, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    /// Product to trade
    pub product_id: String,
    /// Direction
    pub action: Action,
    /// Order type
    pub order_type: OrderType,
    /// Validity
    pub time_type: TimeType,
    /// Number of units
    pub size: f64,
    /// Limit price, required by limit and stop limit orders
    pub price: Option<f64>,
    /// Stop price, required by stop loss and stop limit orders
    pub stop_price: Option<f64>,
}

impl OrderRequest {
    /// Limit order valid for the day
    pub fn limit(product_id: impl Into<String>, action: Action, size: f64, price: f64) -> Self {
        Self {
            product_id: product_id.into(),
            action,
            order_type: OrderType::Limited,
            time_type: TimeType::Day,
            size,
            price: Some(price),
            stop_price: None,
        }
    }

    /// Market order valid for the day
    pub fn market(product_id: impl Into<String>, action: Action, size: f64) -> Self {
        Self {
            product_id: product_id.into(),
            action,
            order_type: OrderType::Market,
            time_type: TimeType::Day,
            size,
            price: None,
            stop_price: None,
        }
    }

    /// Same order with another validity
    #[must_use]
    pub fn with_time_type(mut self, time_type: TimeType) -> Self {
        self.time_type = time_type;
        self
    }

    /// Same order with a stop price
    #[must_use]
    pub fn with_stop_price(mut self, stop_price: f64) -> Self {
        self.stop_price = Some(stop_price);
        self
    }

    /// Checks the order is complete before anything is sent
    pub fn validate(&self) -> Result<(), AppError> {
        if self.product_id.trim().is_empty() {
            return Err(AppError::InvalidInput("product id is empty".to_string()));
        }
        if !(self.size.is_finite() && self.size > 0.0) {
            return Err(AppError::InvalidInput(format!(
                "size must be positive, got {}",
                self.size
            )));
        }
        if self.order_type.needs_price() && self.price.is_none() {
            return Err(AppError::InvalidInput(format!(
                "{} orders need a price",
                self.order_type
            )));
        }
        if self.order_type.needs_stop_price() && self.stop_price.is_none() {
            return Err(AppError::InvalidInput(format!(
                "{} orders need a stop price",
                self.order_type
            )));
        }
        Ok(())
    }

    /// Payload of the check and confirm endpoints
    #[must_use]
    pub fn to_body(&self) -> Value {
        let mut body = json!({
            "buySell": self.action.as_str(),
            "orderType": self.order_type.code(),
            "productId": self.product_id,
            "size": number(self.size),
            "timeType": self.time_type.code(),
        });
        if let Some(price) = self.price {
            body["price"] = number(price);
        }
        if let Some(stop_price) = self.stop_price {
            body["stopPrice"] = number(stop_price);
        }
        body
    }
}

/// Whole numbers are sent as integers, as the web trader does
fn number(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() < 9.0e15 {
        json!(value as i64)
    } else {
        json!(value)
    }
}

/// Parameters of a charting request
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeriesRequest {
    /// Charting identifier of the product
    pub vwd_id: String,
    /// Kind of `vwd_id`
    pub vwd_identifier_type: VwdIdentifierType,
    /// Requested step between points
    pub resolution: Resolution,
    /// Requested history length
    pub period: Period,
    /// Kind of series
    pub price_type: PriceType,
    /// Culture sent to the service
    pub culture: String,
}

impl PriceSeriesRequest {
    /// Request for `product`, failing if it has no charting identifier
    pub fn for_product(
        product: &Product,
        resolution: Resolution,
        period: Period,
        price_type: PriceType,
    ) -> Result<Self, AppError> {
        let (vwd_id, vwd_identifier_type) = product.vwd()?;
        Ok(Self {
            vwd_id: vwd_id.to_string(),
            vwd_identifier_type,
            resolution,
            period,
            price_type,
            culture: DEFAULT_CULTURE.to_string(),
        })
    }

    /// Query string, `user_token` being the session's client id
    #[must_use]
    pub fn to_query(&self, user_token: i64) -> Vec<(&'static str, String)> {
        vec![
            ("requestid", "1".to_string()),
            ("resolution", self.resolution.to_string()),
            ("culture", self.culture.clone()),
            ("period", self.period.to_string()),
            (
                "series",
                format!(
                    "{}:{}:{}",
                    self.price_type.as_str(),
                    self.vwd_identifier_type.as_str(),
                    self.vwd_id
                ),
            ),
            ("format", "json".to_string()),
            ("userToken", user_token.to_string()),
        ]
    }
}

/// Sort direction of product searches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending
    Asc,
    /// Descending
    Desc,
}

impl SortOrder {
    fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Raw parameters of one product search page
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductSearchParams {
    /// Free text
    pub search_text: Option<String>,
    /// Restrict to a product type
    pub product_type_id: Option<ProductTypeId>,
    /// Restrict to a country identifier
    pub country_id: Option<String>,
    /// Restrict to an index identifier
    pub index_id: Option<String>,
    /// Page size
    pub limit: usize,
    /// Offset of the first product
    pub offset: usize,
    /// Sort column and direction
    pub sort: Option<(String, SortOrder)>,
}

impl ProductSearchParams {
    /// Query string for one page
    ///
    /// Searching by index without text fails server side, so an empty text is
    /// sent in that case.
    #[must_use]
    pub fn to_query(&self, int_account: i64, session_id: &str) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("offset", self.offset.to_string()),
            ("limit", self.limit.to_string()),
            ("intAccount", int_account.to_string()),
            ("sessionId", session_id.to_string()),
            ("requireTotal", "true".to_string()),
        ];
        if let Some(product_type_id) = self.product_type_id {
            query.push(("productTypeId", product_type_id.code().to_string()));
        }
        if let Some(country_id) = &self.country_id {
            query.push(("stockCountryId", country_id.clone()));
        }
        let search_text = match (&self.search_text, &self.index_id) {
            (Some(text), _) => Some(text.clone()),
            (None, Some(_)) => Some(String::new()),
            (None, None) => None,
        };
        if let Some(index_id) = &self.index_id {
            query.push(("indexId", index_id.clone()));
        }
        if let Some(text) = search_text {
            query.push(("searchText", text));
        }
        if let Some((column, order)) = &self.sort {
            query.push(("sortColumns", column.clone()));
            query.push(("sortTypes", order.as_str().to_string()));
        }
        query
    }
}

/// Parameters of the company news endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct NewsRequest {
    /// ISIN of the company
    pub isin: String,
    /// Maximum number of articles
    pub limit: usize,
    /// Offset of the first article
    pub offset: usize,
    /// Comma separated language codes, e.g. `en,fr`
    pub languages: String,
}

impl NewsRequest {
    /// Ten English articles about `isin`
    pub fn new(isin: impl Into<String>) -> Self {
        Self {
            isin: isin.into(),
            limit: 10,
            offset: 0,
            languages: "en".to_string(),
        }
    }

    /// Query string
    #[must_use]
    pub fn to_query(&self, int_account: i64, session_id: &str) -> Vec<(&'static str, String)> {
        vec![
            ("isin", self.isin.clone()),
            ("limit", self.limit.to_string()),
            ("offset", self.offset.to_string()),
            ("languages", self.languages.clone()),
            ("intAccount", int_account.to_string()),
            ("sessionId", session_id.to_string()),
        ]
    }
}

/// Criterion of a high-level product search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchBy {
    /// Free text, matched by the server against names, symbols and ISINs
    Text(String),
    /// Exact ISIN
    Isin(String),
    /// Exact ticker symbol
    Symbol(String),
    /// Constituents of the index with this dictionary name, e.g. `CAC 40`
    Index(String),
    /// Products of the country with this dictionary ISO code, e.g. `FR`
    Country(String),
}

/// High-level product search: one criterion plus optional filters
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    /// Search criterion
    pub by: SearchBy,
    /// Exchange abbreviation (`EPA`) or MIC (`XPAR`), resolved through the dictionary
    pub exchange: Option<String>,
    /// Product type, stocks by default
    pub product_type: ProductTypeId,
    /// Page size
    pub limit: usize,
    /// Maximum number of pages fetched
    pub max_pages: usize,
}

impl SearchQuery {
    /// Query with default filters
    #[must_use]
    pub fn new(by: SearchBy) -> Self {
        Self {
            by,
            exchange: None,
            product_type: ProductTypeId::Stock,
            limit: DEFAULT_SEARCH_LIMIT,
            max_pages: DEFAULT_SEARCH_MAX_PAGES,
        }
    }

    /// Restricts results to one exchange
    #[must_use]
    pub fn with_exchange(mut self, exchange: impl Into<String>) -> Self {
        self.exchange = Some(exchange.into());
        self
    }

    /// Restricts results to a product type
    #[must_use]
    pub fn with_product_type(mut self, product_type: ProductTypeId) -> Self {
        self.product_type = product_type;
        self
    }

    /// Sets the page size
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Sets the maximum number of pages
    #[must_use]
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Parameters of the first page, with index and country names resolved
    pub fn first_page(
        &self,
        dictionary: &ExchangeDictionary,
    ) -> Result<ProductSearchParams, AppError> {
        if self.limit == 0 || self.max_pages == 0 {
            return Err(AppError::InvalidInput(
                "search limit and max pages must be positive".to_string(),
            ));
        }
        let mut params = ProductSearchParams {
            product_type_id: Some(self.product_type),
            limit: self.limit,
            ..ProductSearchParams::default()
        };
        match &self.by {
            SearchBy::Text(text) | SearchBy::Isin(text) | SearchBy::Symbol(text) => {
                params.search_text = Some(text.clone());
            }
            SearchBy::Index(name) => {
                let index = dictionary.index_by(&IndexLookup::Name(name.clone()))?;
                params.index_id = Some(index.id.clone());
            }
            SearchBy::Country(name) => {
                params.country_id =
                    Some(dictionary.country_by(&CountryLookup::Name(name.clone()))?.id.clone());
            }
        }
        Ok(params)
    }

    /// Identifier of the exchange filter, if any
    pub fn exchange_id(&self, dictionary: &ExchangeDictionary) -> Result<Option<String>, AppError> {
        let Some(exchange) = &self.exchange else {
            return Ok(None);
        };
        let found = dictionary
            .exchange_by(&ExchangeLookup::HiqAbbr(exchange.clone()))
            .or_else(|_| dictionary.exchange_by(&ExchangeLookup::MicCode(exchange.clone())))?;
        Ok(Some(found.id.clone()))
    }

    /// True if `product` passes the client-side filters
    #[must_use]
    pub fn matches(&self, product: &Product, exchange_id: Option<&str>) -> bool {
        if product.product_type_id != self.product_type {
            return false;
        }
        if exchange_id.is_some_and(|id| product.exchange_id != id) {
            return false;
        }
        match &self.by {
            SearchBy::Isin(isin) => &product.isin == isin,
            SearchBy::Symbol(symbol) => &product.symbol == symbol,
            SearchBy::Text(_) | SearchBy::Index(_) | SearchBy::Country(_) => true,
        }
    }
}
