use crate::error::{AppError, ValidationError};
use crate::model::validation::JsonFields;
use crate::presentation::dictionary::{Exchange, ExchangeDictionary, ExchangeLookup};
use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Product type identifiers used by the product search and info endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "i64", into = "i64")]
pub enum ProductTypeId {
    /// Shares
    #[default]
    Stock,
    /// Bonds
    Bond,
    /// Futures
    Futures,
    /// Options
    Options,
    /// Investment funds
    InvestFund,
    /// Leveraged products (turbos, sprinters)
    LeverageProduct,
    /// Exchange traded funds
    Etf,
    /// Indices
    Index,
    /// Currencies
    Currency,
    /// Contracts for difference
    Cfd,
    /// Warrants
    Warrant,
    /// Any identifier this crate does not name
    Other(i64),
}

impl ProductTypeId {
    /// Numeric identifier sent to and received from the server
    #[must_use]
    pub fn code(self) -> i64 {
        match self {
            ProductTypeId::Stock => 1,
            ProductTypeId::Bond => 2,
            ProductTypeId::Futures => 7,
            ProductTypeId::Options => 8,
            ProductTypeId::InvestFund => 13,
            ProductTypeId::LeverageProduct => 14,
            ProductTypeId::Etf => 131,
            ProductTypeId::Index => 180,
            ProductTypeId::Currency => 311,
            ProductTypeId::Cfd => 535,
            ProductTypeId::Warrant => 536,
            ProductTypeId::Other(code) => code,
        }
    }
}

impl From<i64> for ProductTypeId {
    fn from(code: i64) -> Self {
        match code {
            1 => ProductTypeId::Stock,
            2 => ProductTypeId::Bond,
            7 => ProductTypeId::Futures,
            8 => ProductTypeId::Options,
            13 => ProductTypeId::InvestFund,
            14 => ProductTypeId::LeverageProduct,
            131 => ProductTypeId::Etf,
            180 => ProductTypeId::Index,
            311 => ProductTypeId::Currency,
            535 => ProductTypeId::Cfd,
            536 => ProductTypeId::Warrant,
            other => ProductTypeId::Other(other),
        }
    }
}

impl From<ProductTypeId> for i64 {
    fn from(id: ProductTypeId) -> Self {
        id.code()
    }
}

impl fmt::Display for ProductTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Kind of identifier the charting service expects for a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VwdIdentifierType {
    /// `issueid`
    IssueId,
    /// `vwdkey`
    VwdKey,
}

impl VwdIdentifierType {
    /// Value used in the charting `series` parameter
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            VwdIdentifierType::IssueId => "issueid",
            VwdIdentifierType::VwdKey => "vwdkey",
        }
    }
}

impl FromStr for VwdIdentifierType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "issueid" => Ok(VwdIdentifierType::IssueId),
            "vwdkey" => Ok(VwdIdentifierType::VwdKey),
            other => Err(AppError::InvalidInput(format!(
                "vwdIdentifierType must be 'issueid' or 'vwdkey', not {other}"
            ))),
        }
    }
}

impl fmt::Display for VwdIdentifierType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tradeable instrument
#[derive(DebugPretty, DisplaySimple, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Broker product identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// ISIN code
    pub isin: String,
    /// Ticker symbol
    pub symbol: String,
    /// Trading currency
    pub currency: String,
    /// Identifier of the listing exchange, see [`ExchangeDictionary`]
    pub exchange_id: String,
    /// Product type
    pub product_type_id: ProductTypeId,
    /// Product type name, e.g. `STOCK`
    pub product_type: Option<String>,
    /// Whether orders can be placed on it
    pub tradable: bool,
    /// Identifier used by the charting service
    pub vwd_id: Option<String>,
    /// Kind of `vwd_id`
    pub vwd_identifier_type: Option<VwdIdentifierType>,
    /// Broker category letter
    pub category: Option<String>,
    /// Last close price
    pub close_price: Option<f64>,
}

impl Product {
    /// Builds a product from a search result or a products info entry
    pub fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let fields = JsonFields::new("Product", value)?;
        let vwd_identifier_type = match fields.opt_str("vwdIdentifierType")? {
            None => None,
            Some(raw) => Some(raw.parse::<VwdIdentifierType>().map_err(|_| {
                ValidationError::new(
                    "Product",
                    "vwdIdentifierType",
                    "\"issueid\" or \"vwdkey\"",
                    raw,
                )
            })?),
        };

        Ok(Self {
            id: fields.id("id")?,
            name: fields.str("name")?,
            isin: fields.str("isin")?,
            symbol: fields.str("symbol")?,
            currency: fields.str("currency")?,
            exchange_id: fields.id("exchangeId")?,
            product_type_id: ProductTypeId::from(fields.i64("productTypeId")?),
            product_type: fields.opt_str("productType")?,
            tradable: fields.bool("tradable")?,
            vwd_id: fields.opt_id("vwdId")?,
            vwd_identifier_type,
            category: fields.opt_str("category")?,
            close_price: fields.opt_f64("closePrice")?,
        })
    }

    /// Listing exchange, resolved through the dictionary
    pub fn exchange<'a>(
        &self,
        dictionary: &'a ExchangeDictionary,
    ) -> Result<&'a Exchange, AppError> {
        dictionary.exchange_by(&ExchangeLookup::Id(self.exchange_id.clone()))
    }

    /// Charting identifier and its kind, required to fetch price series
    pub fn vwd(&self) -> Result<(&str, VwdIdentifierType), AppError> {
        match (&self.vwd_id, self.vwd_identifier_type) {
            (Some(id), Some(kind)) => Ok((id.as_str(), kind)),
            _ => Err(AppError::InvalidInput(format!(
                "product {} has no charting identifier",
                self.id
            ))),
        }
    }
}

/// Maps a products info response to products, in the order of `product_ids`
///
/// The response holds products keyed by identifier under `data`. An
/// identifier missing from the response is a validation error.
pub fn products_from_info(
    value: &Value,
    product_ids: &[String],
) -> Result<Vec<Product>, ValidationError> {
    let root = JsonFields::new("ProductsInfo", value)?;
    let data = JsonFields::from_map("ProductsInfo", root.object("data")?);
    product_ids
        .iter()
        .map(|id| {
            let entry = data.value(id).map_err(|e| ValidationError {
                field: format!("data.{id}"),
                ..e
            })?;
            Product::from_json(entry)
        })
        .collect()
}

/// Maps one page of the product lookup to products
///
/// A page without a `products` array holds no product.
pub fn products_from_lookup(value: &Value) -> Result<Vec<Product>, ValidationError> {
    let root = JsonFields::new("ProductLookup", value)?;
    let Some(products) = root.opt_array("products")? else {
        return Ok(Vec::new());
    };
    products.iter().map(Product::from_json).collect()
}
