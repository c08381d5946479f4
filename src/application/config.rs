use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_BURST_SIZE, DEFAULT_CHARTING_URL, DEFAULT_MAX_REQUESTS,
    DEFAULT_PERIOD_SECONDS, DEFAULT_TIMEOUT_SECONDS,
};
use crate::error::AppError;
use crate::utils::config::{get_env_or_default, get_env_or_none};
use crate::utils::otp::current_totp;
use dotenv::dotenv;
use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone, Default, PartialEq)]
/// Login credentials
///
/// Secrets are never serialized, so printing a `Credentials` or a `Config`
/// only ever shows the username.
pub struct Credentials {
    /// Account username
    pub username: String,
    /// Account password
    #[serde(skip_serializing, default)]
    pub password: String,
    /// Base32 shared secret used to derive one-time passwords
    #[serde(skip_serializing, default)]
    pub totp_secret: Option<String>,
    /// One-time password typed by the user
    #[serde(skip_serializing, default)]
    pub one_time_password: Option<String>,
}

impl Credentials {
    /// Username and password only
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            totp_secret: None,
            one_time_password: None,
        }
    }

    /// Adds a shared TOTP secret
    #[must_use]
    pub fn with_totp_secret(mut self, secret: impl Into<String>) -> Self {
        self.totp_secret = Some(secret.into());
        self
    }

    /// Adds a one-time password
    #[must_use]
    pub fn with_one_time_password(mut self, code: impl Into<String>) -> Self {
        self.one_time_password = Some(code.into());
        self
    }

    /// Rejects credentials carrying both a one-time password and a TOTP secret
    pub fn validate(&self) -> Result<(), AppError> {
        if self.one_time_password.is_some() && self.totp_secret.is_some() {
            return Err(AppError::InvalidInput(
                "provide either a one-time password or a TOTP secret, not both".to_string(),
            ));
        }
        Ok(())
    }

    /// True if a one-time password or a TOTP secret is present
    #[must_use]
    pub fn has_second_factor(&self) -> bool {
        self.one_time_password.is_some() || self.totp_secret.is_some()
    }

    /// Resolves the second factor to send, if any
    ///
    /// A secret is turned into a fresh code on every call, so call this right
    /// before the code is sent. Supplying both a code and a secret is
    /// ambiguous and rejected.
    pub fn second_factor(&self) -> Result<Option<String>, AppError> {
        self.validate()?;
        match (&self.one_time_password, &self.totp_secret) {
            (Some(code), _) => Ok(Some(code.trim().to_string())),
            (None, Some(secret)) => current_totp(secret).map(Some),
            (None, None) => Ok(None),
        }
    }
}

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone, Default, PartialEq)]
/// Main configuration of the client
pub struct Config {
    /// Login credentials
    pub credentials: Credentials,
    /// REST endpoints and timeout
    pub rest_api: RestApiConfig,
    /// Request throttling
    pub rate_limiter: RateLimiterConfig,
}

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone, PartialEq)]
/// Configuration of the REST API
pub struct RestApiConfig {
    /// Base URL of the web trader, login and configuration endpoints live here
    pub base_url: String,
    /// URL of the charting service serving price series
    pub charting_url: String,
    /// Timeout in seconds for REST requests
    pub timeout: u64,
}

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone, PartialEq)]
/// Configuration for rate limiting API requests
pub struct RateLimiterConfig {
    /// Maximum number of requests allowed per period, 0 disables throttling
    pub max_requests: u32,
    /// Time period in seconds for the rate limit
    pub period_seconds: u64,
    /// Maximum number of requests that can be made at once
    pub burst_size: u32,
}

impl Default for RestApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            charting_url: DEFAULT_CHARTING_URL.to_string(),
            timeout: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self {
            max_requests: DEFAULT_MAX_REQUESTS,
            period_seconds: DEFAULT_PERIOD_SECONDS,
            burst_size: DEFAULT_BURST_SIZE,
        }
    }
}

impl Config {
    /// Builds the configuration from the environment and an optional `.env` file
    ///
    /// Recognised variables: `DEGIRO_USERNAME`, `DEGIRO_PASSWORD`,
    /// `DEGIRO_TOTP_SECRET`, `DEGIRO_ONE_TIME_PASSWORD`, `DEGIRO_BASE_URL`,
    /// `DEGIRO_CHARTING_URL`, `DEGIRO_REST_TIMEOUT`,
    /// `DEGIRO_RATE_LIMIT_MAX_REQUESTS`, `DEGIRO_RATE_LIMIT_PERIOD_SECONDS`
    /// and `DEGIRO_RATE_LIMIT_BURST_SIZE`.
    ///
    /// # Returns
    ///
    /// A configuration where every unset or unparsable variable keeps its
    /// default. Missing credentials are logged, not rejected: login fails later.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use degiroasync::application::config::Config;
    ///
    /// // DEGIRO_USERNAME=jdoe DEGIRO_PASSWORD=... DEGIRO_TOTP_SECRET=...
    /// let config = Config::new();
    /// assert_eq!(config.credentials.username, "jdoe");
    /// assert!(config.credentials.totp_secret.is_some());
    /// ```
    pub fn new() -> Self {
        match dotenv() {
            Ok(_) => debug!("Successfully loaded .env file"),
            Err(e) => debug!("Failed to load .env file: {e}"),
        }

        let username = get_env_or_default("DEGIRO_USERNAME", String::new());
        let password = get_env_or_default("DEGIRO_PASSWORD", String::new());
        if username.is_empty() {
            error!("DEGIRO_USERNAME not found in environment variables or .env file");
        }
        if password.is_empty() {
            error!("DEGIRO_PASSWORD not found in environment variables or .env file");
        }

        let defaults = Self::default();
        Config {
            credentials: Credentials {
                username,
                password,
                totp_secret: get_env_or_none("DEGIRO_TOTP_SECRET"),
                one_time_password: get_env_or_none("DEGIRO_ONE_TIME_PASSWORD"),
            },
            rest_api: RestApiConfig {
                base_url: get_env_or_default("DEGIRO_BASE_URL", defaults.rest_api.base_url),
                charting_url: get_env_or_default(
                    "DEGIRO_CHARTING_URL",
                    defaults.rest_api.charting_url,
                ),
                timeout: get_env_or_default("DEGIRO_REST_TIMEOUT", defaults.rest_api.timeout),
            },
            rate_limiter: RateLimiterConfig {
                max_requests: get_env_or_default(
                    "DEGIRO_RATE_LIMIT_MAX_REQUESTS",
                    defaults.rate_limiter.max_requests,
                ),
                period_seconds: get_env_or_default(
                    "DEGIRO_RATE_LIMIT_PERIOD_SECONDS",
                    defaults.rate_limiter.period_seconds,
                ),
                burst_size: get_env_or_default(
                    "DEGIRO_RATE_LIMIT_BURST_SIZE",
                    defaults.rate_limiter.burst_size,
                ),
            },
        }
    }

    /// Same configuration pointed at another web trader host
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.rest_api.base_url = base_url.into();
        self
    }

    /// Same configuration pointed at another charting service
    #[must_use]
    pub fn with_charting_url(mut self, charting_url: impl Into<String>) -> Self {
        self.rest_api.charting_url = charting_url.into();
        self
    }
}
