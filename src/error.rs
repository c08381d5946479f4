use reqwest::StatusCode;
use std::fmt;

/// Convenience alias used across the crate
pub type AppResult<T> = Result<T, AppError>;

/// A response did not match the shape a domain type expects
///
/// Carries enough context to diagnose a remote API change without looking at
/// the raw payload: the entity being built, the offending field, the expected
/// shape and what was actually found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Entity being mapped, e.g. `Product` or `Position`
    pub entity: String,
    /// Name of the offending field
    pub field: String,
    /// Expected JSON shape
    pub expected: &'static str,
    /// Observed JSON shape (`missing`, `null`, `string`, ...)
    pub found: String,
}

impl ValidationError {
    /// Creates a new validation error
    pub fn new(
        entity: impl Into<String>,
        field: impl Into<String>,
        expected: &'static str,
        found: impl Into<String>,
    ) -> Self {
        Self {
            entity: entity.into(),
            field: field.into(),
            expected,
            found: found.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid {}: field `{}` expected {}, found {}",
            self.entity, self.field, self.expected, self.found
        )
    }
}

impl std::error::Error for ValidationError {}

/// Main error type of the library
#[derive(Debug)]
pub enum AppError {
    /// Username or password were rejected by the server
    BadCredentials,
    /// The account requires a one-time password and none could be supplied
    SecondFactorRequired,
    /// The one-time password was rejected by the server
    InvalidSecondFactor,
    /// The shared TOTP secret could not be decoded
    InvalidSecret(String),
    /// Login succeeded but no session cookie came back
    MissingSessionCookie,
    /// The session is no longer accepted by the server
    SessionExpired,
    /// A response did not match the expected shape
    Validation(ValidationError),
    /// The server answered with a non-success status
    Response {
        /// HTTP status returned
        status: StatusCode,
        /// URL that was called
        url: String,
        /// Body returned, unmodified
        body: String,
    },
    /// Network level failure
    Network(reqwest::Error),
    /// The response body is not valid JSON
    Json(serde_json::Error),
    /// The caller supplied invalid parameters
    InvalidInput(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadCredentials => write!(f, "bad credentials"),
            AppError::SecondFactorRequired => write!(
                f,
                "second factor required: neither a TOTP secret nor a one-time password was given"
            ),
            AppError::InvalidSecondFactor => write!(f, "invalid second factor"),
            AppError::InvalidSecret(msg) => write!(f, "invalid totp secret: {msg}"),
            AppError::MissingSessionCookie => write!(f, "no JSESSIONID in login response"),
            AppError::SessionExpired => write!(f, "session expired"),
            AppError::Validation(e) => write!(f, "validation error: {e}"),
            AppError::Response { status, url, body } => {
                write!(f, "error on call: url {url} | code {status} | content {body}")
            }
            AppError::Network(e) => write!(f, "network error: {e}"),
            AppError::Json(e) => write!(f, "json error: {e}"),
            AppError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Validation(e) => Some(e),
            AppError::Network(e) => Some(e),
            AppError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl AppError {
    /// True for authentication failures the caller may fix by changing credentials
    #[must_use]
    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            AppError::BadCredentials
                | AppError::SecondFactorRequired
                | AppError::InvalidSecondFactor
                | AppError::InvalidSecret(_)
                | AppError::MissingSessionCookie
                | AppError::SessionExpired
        )
    }

    /// True for network failures and non-success statuses
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            AppError::Network(_) | AppError::Response { .. } | AppError::Json(_)
        )
    }

    /// Status code of a non-success response, if any
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            AppError::Response { status, .. } => Some(*status),
            AppError::Network(e) => e.status(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::Network(e)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Json(e)
    }
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::Validation(e)
    }
}
