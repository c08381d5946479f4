//! # degiroasync prelude
//!
//! Commonly used types and traits in one import:
//!
//! ```rust
//! use degiroasync::prelude::*;
//!
//! let credentials = Credentials::new("user", "password").with_totp_secret("GEZDGNBVGY3TQOJQ");
//! assert!(credentials.second_factor().unwrap().is_some());
//! ```

// ============================================================================
// CONFIGURATION AND SETUP
// ============================================================================

/// Configuration and credentials
pub use crate::application::config::{Config, Credentials, RateLimiterConfig, RestApiConfig};

/// Library version information
pub use crate::{VERSION, version};

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Error types
pub use crate::error::{AppError, AppResult, ValidationError};

// ============================================================================
// SESSION AND CLIENTS
// ============================================================================

/// Session values
pub use crate::application::auth::{AccountClient, Session, SessionConfig, SessionCore};

/// High-level client
pub use crate::application::client::Client;

/// Endpoint layer
pub use crate::webapi::WebApi;

// ============================================================================
// SERVICES (TRAITS)
// ============================================================================

/// Service traits implemented by [`Client`]
pub use crate::application::services::{
    OrderService, PortfolioService, ProductService, SessionService,
};

// ============================================================================
// REQUESTS
// ============================================================================

/// Typed request parameters
pub use crate::model::requests::{
    NewsRequest, OrderRequest, PriceSeriesRequest, ProductSearchParams, SearchBy, SearchQuery,
    SortOrder,
};

// ============================================================================
// DOMAIN TYPES
// ============================================================================

/// Dictionary
pub use crate::presentation::dictionary::{
    Country, CountryLookup, Exchange, ExchangeDictionary, ExchangeLookup, Index, IndexLookup,
    Region,
};

/// Orders and transactions
pub use crate::presentation::order::{
    Action, Order, OrderCheck, OrderConfirmation, OrderType, TimeType, Transaction, TransactionFee,
};

/// Portfolio
pub use crate::presentation::portfolio::{
    CashBalance, Portfolio, Position, PositionType, TotalPortfolio,
};

/// Prices
pub use crate::presentation::price::{
    Ohlc, Period, PricePoint, PriceSeries, PriceType, Resolution, TimeSpan, TimeUnit,
};

/// Products
pub use crate::presentation::product::{Product, ProductTypeId, VwdIdentifierType};

// ============================================================================
// UTILITIES
// ============================================================================

/// Logging utilities
pub use crate::utils::logger::setup_logger;

/// One-time passwords
pub use crate::utils::otp::{current_totp, generate_totp};

// ============================================================================
// RE-EXPORTS FROM EXTERNAL CRATES
// ============================================================================

/// Re-export commonly used external types
pub use async_trait::async_trait;
pub use chrono::NaiveDate;
pub use serde_json::Value;
pub use tracing::{debug, error, info, warn};
