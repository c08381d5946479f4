use crate::error::{AppError, ValidationError};
use crate::model::validation::JsonFields;
use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Geographical region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Identifier
    pub id: String,
    /// Name
    pub name: String,
}

/// Country, `name` is the ISO code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    /// Identifier
    pub id: String,
    /// ISO code, e.g. `FR`
    pub name: String,
    /// Identifier of the enclosing region
    pub region_id: Option<String>,
}

/// Trading venue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exchange {
    /// Identifier, matches `Product::exchange_id`
    pub id: String,
    /// Name
    pub name: String,
    /// Short code
    pub code: Option<String>,
    /// Abbreviation used by the web trader, e.g. `EPA`
    pub hiq_abbr: Option<String>,
    /// Market identifier code, e.g. `XPAR`
    pub mic_code: Option<String>,
    /// Country code
    pub country: Option<String>,
    /// City
    pub city: Option<String>,
}

/// Stock index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Index {
    /// Identifier, used by product searches
    pub id: String,
    /// Name, e.g. `CAC 40`
    pub name: String,
    /// Product identifier of the index itself
    pub product_id: Option<String>,
}

/// Key used to find an exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExchangeLookup {
    /// By identifier
    Id(String),
    /// By name
    Name(String),
    /// By web trader abbreviation
    HiqAbbr(String),
    /// By market identifier code
    MicCode(String),
}

/// Key used to find a country
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountryLookup {
    /// By identifier
    Id(String),
    /// By ISO code
    Name(String),
}

/// Key used to find an index
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexLookup {
    /// By identifier
    Id(String),
    /// By name
    Name(String),
}

/// Human readable data attached to products: regions, countries, exchanges and indices
#[derive(DebugPretty, DisplaySimple, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ExchangeDictionary {
    /// Regions
    pub regions: Vec<Region>,
    /// Countries
    pub countries: Vec<Country>,
    /// Exchanges
    pub exchanges: Vec<Exchange>,
    /// Indices
    pub indices: Vec<Index>,
}

impl ExchangeDictionary {
    /// Builds the dictionary from the product dictionary endpoint
    ///
    /// Sections missing from the response are left empty.
    pub fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let fields = JsonFields::new("ExchangeDictionary", value)?;

        let regions = map_section(&fields, "regions", "Region", |f| {
            Ok(Region {
                id: f.id("id")?,
                name: f.str("name")?,
            })
        })?;
        let countries = map_section(&fields, "countries", "Country", |f| {
            Ok(Country {
                id: f.id("id")?,
                name: f.str("name")?,
                region_id: f.opt_id("region")?,
            })
        })?;
        let exchanges = map_section(&fields, "exchanges", "Exchange", |f| {
            Ok(Exchange {
                id: f.id("id")?,
                name: f.str("name")?,
                code: f.opt_str("code")?,
                hiq_abbr: f.opt_str("hiqAbbr")?,
                mic_code: f.opt_str("micCode")?,
                country: f.opt_id("country")?,
                city: f.opt_str("city")?,
            })
        })?;
        let indices = map_section(&fields, "indices", "Index", |f| {
            Ok(Index {
                id: f.id("id")?,
                name: f.str("name")?,
                product_id: f.opt_id("productId")?,
            })
        })?;

        Ok(Self {
            regions,
            countries,
            exchanges,
            indices,
        })
    }

    /// Finds an exchange, failing with `InvalidInput` when none matches
    pub fn exchange_by(&self, lookup: &ExchangeLookup) -> Result<&Exchange, AppError> {
        self.exchanges
            .iter()
            .find(|e| match lookup {
                ExchangeLookup::Id(id) => &e.id == id,
                ExchangeLookup::Name(name) => &e.name == name,
                ExchangeLookup::HiqAbbr(abbr) => e.hiq_abbr.as_deref() == Some(abbr.as_str()),
                ExchangeLookup::MicCode(mic) => e.mic_code.as_deref() == Some(mic.as_str()),
            })
            .ok_or_else(|| AppError::InvalidInput(format!("no exchange matching {lookup:?}")))
    }

    /// Finds a country, failing with `InvalidInput` when none matches
    pub fn country_by(&self, lookup: &CountryLookup) -> Result<&Country, AppError> {
        self.countries
            .iter()
            .find(|c| match lookup {
                CountryLookup::Id(id) => &c.id == id,
                CountryLookup::Name(name) => &c.name == name,
            })
            .ok_or_else(|| AppError::InvalidInput(format!("no country matching {lookup:?}")))
    }

    /// Finds an index, failing with `InvalidInput` when none matches
    pub fn index_by(&self, lookup: &IndexLookup) -> Result<&Index, AppError> {
        self.indices
            .iter()
            .find(|i| match lookup {
                IndexLookup::Id(id) => &i.id == id,
                IndexLookup::Name(name) => &i.name == name,
            })
            .ok_or_else(|| AppError::InvalidInput(format!("no index matching {lookup:?}")))
    }
}

fn map_section<T>(
    fields: &JsonFields<'_>,
    section: &str,
    entity: &str,
    build: impl Fn(&JsonFields<'_>) -> Result<T, ValidationError>,
) -> Result<Vec<T>, ValidationError> {
    let Some(items) = fields.opt_array(section)? else {
        return Ok(Vec::new());
    };
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let entry = JsonFields::new(entity, item).map_err(|e| ValidationError {
                field: format!("{section}[{index}]"),
                ..e
            })?;
            build(&entry)
        })
        .collect()
}
