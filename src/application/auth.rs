//! Session values
//!
//! A [`Session`] is built once by a login and then passed by reference to
//! every call. It is immutable: nothing in the crate ever updates it, and the
//! crate keeps no copy of it. When the server expires it, calls fail with
//! [`crate::error::AppError::SessionExpired`] and the caller logs in again.

use crate::error::ValidationError;
use crate::model::validation::JsonFields;
use crate::presentation::dictionary::ExchangeDictionary;
use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Result of the low-level login: the session cookie
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCore {
    jsessionid: String,
}

impl SessionCore {
    /// Wraps a `JSESSIONID` value
    pub fn new(jsessionid: impl Into<String>) -> Self {
        Self {
            jsessionid: jsessionid.into(),
        }
    }

    /// The `JSESSIONID` cookie value
    #[must_use]
    pub fn jsessionid(&self) -> &str {
        &self.jsessionid
    }
}

impl fmt::Debug for SessionCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCore").field("jsessionid", &"***").finish()
    }
}

/// Service URLs and identifiers returned by the configuration endpoint
#[derive(DebugPretty, DisplaySimple, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Client identifier, used as the charting user token
    pub client_id: i64,
    /// Session identifier sent as a query parameter
    #[serde(skip_serializing)]
    pub session_id: String,
    /// Trading service
    pub trading_url: String,
    /// Account service
    pub pa_url: String,
    /// Product search service
    pub product_search_url: String,
    /// Product dictionary
    pub dictionary_url: String,
    /// Reports: order history, transactions
    pub reporting_url: String,
    /// Company news
    pub refinitiv_news_url: Option<String>,
    /// Company profiles
    pub refinitiv_company_profile_url: Option<String>,
}

impl SessionConfig {
    /// Builds the configuration from the `login/secure/config` response
    pub fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let root = JsonFields::new("SessionConfig", value)?;
        let f = JsonFields::from_map("SessionConfig", root.object("data")?);
        Ok(Self {
            client_id: f.i64("clientId")?,
            session_id: f.str("sessionId")?,
            trading_url: f.str("tradingUrl")?,
            pa_url: f.str("paUrl")?,
            product_search_url: f.str("productSearchUrl")?,
            dictionary_url: f.str("dictionaryUrl")?,
            reporting_url: f.str("reportingUrl")?,
            refinitiv_news_url: f.opt_str("refinitivNewsUrl")?,
            refinitiv_company_profile_url: f.opt_str("refinitivCompanyProfileUrl")?,
        })
    }
}

/// Account owner, from the client endpoint
#[derive(DebugPretty, DisplaySimple, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountClient {
    /// Client identifier
    pub id: i64,
    /// Integer account number, sent as `intAccount`
    pub int_account: i64,
    /// Login name
    pub username: Option<String>,
    /// Display name
    pub display_name: Option<String>,
    /// Email address
    pub email: Option<String>,
    /// Base currency of the account, e.g. `EUR`
    pub base_currency: Option<String>,
}

impl AccountClient {
    /// Builds the account owner from the `client` response
    pub fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let root = JsonFields::new("AccountClient", value)?;
        let f = JsonFields::from_map("AccountClient", root.object("data")?);
        let base_currency = match f.opt_object("bankAccount")? {
            Some(bank) => JsonFields::from_map("AccountClient", bank).opt_str("currencyCode")?,
            None => None,
        };
        Ok(Self {
            id: f.i64("id")?,
            int_account: f.i64("intAccount")?,
            username: f.opt_str("username")?,
            display_name: f.opt_str("displayName")?,
            email: f.opt_str("email")?,
            base_currency,
        })
    }
}

#[derive(Debug, PartialEq)]
struct SessionInner {
    core: SessionCore,
    config: SessionConfig,
    client: AccountClient,
    dictionary: ExchangeDictionary,
}

/// Authenticated context passed to every call
///
/// Cloning is cheap and clones share the same data.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    inner: Arc<SessionInner>,
}

impl Session {
    /// Assembles a session from the results of the login sequence
    pub fn new(
        core: SessionCore,
        config: SessionConfig,
        client: AccountClient,
        dictionary: ExchangeDictionary,
    ) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                core,
                config,
                client,
                dictionary,
            }),
        }
    }

    /// Session cookie
    #[must_use]
    pub fn core(&self) -> &SessionCore {
        &self.inner.core
    }

    /// `JSESSIONID` cookie value
    #[must_use]
    pub fn jsessionid(&self) -> &str {
        self.inner.core.jsessionid()
    }

    /// Service URLs
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.inner.config
    }

    /// Account owner
    #[must_use]
    pub fn client(&self) -> &AccountClient {
        &self.inner.client
    }

    /// Product dictionary fetched at login
    #[must_use]
    pub fn dictionary(&self) -> &ExchangeDictionary {
        &self.inner.dictionary
    }

    /// `intAccount` query parameter
    #[must_use]
    pub fn int_account(&self) -> i64 {
        self.inner.client.int_account
    }

    /// `sessionId` query parameter
    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.inner.config.session_id
    }

    /// `intAccount` and `sessionId`, the query most endpoints expect
    #[must_use]
    pub fn account_query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("intAccount", self.int_account().to_string()),
            ("sessionId", self.session_id().to_string()),
        ]
    }
}
