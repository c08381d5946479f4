//! Low-level endpoint layer
//!
//! One method per remote endpoint. Requests are built the way the web trader
//! builds them and the decoded JSON body is returned without interpretation.
//! Transport errors, including non-success statuses, surface unmodified.

use crate::application::config::Config;
use crate::error::AppError;
use crate::model::http::HttpClient;
use std::sync::Arc;

/// Login, configuration and account endpoints
pub mod login;
/// Product information, search, company data and charting endpoints
pub mod product;
/// Trading update, reports and order endpoints
pub mod trading;

/// Entry point of the endpoint layer
#[derive(Debug, Clone)]
pub struct WebApi {
    http: HttpClient,
}

impl WebApi {
    /// Creates the endpoint layer for a configuration
    pub fn new(config: Config) -> Result<Self, AppError> {
        Ok(Self {
            http: HttpClient::new(Arc::new(config))?,
        })
    }

    /// Wraps an existing transport
    #[must_use]
    pub fn from_http(http: HttpClient) -> Self {
        Self { http }
    }

    /// Underlying transport
    #[must_use]
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Configuration in use
    #[must_use]
    pub fn config(&self) -> &Config {
        self.http.config()
    }
}
