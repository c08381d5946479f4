use crate::application::config::Credentials;
use serde::{Deserialize, Serialize};

/// Query parameters the web trader sends along with a login
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginQueryParams {
    /// Why the login happens, always `session_expired` in the web trader
    pub reason: String,
}

/// Payload of the login and TOTP login endpoints
#[derive(Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Account username
    pub username: String,
    /// Account password
    pub password: String,
    /// Always false
    pub is_redirect_to_mobile: bool,
    /// Always empty
    pub is_pass_code_reset: String,
    /// See [`LoginQueryParams`]
    pub query_params: LoginQueryParams,
    /// Second factor, only sent to the TOTP endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub one_time_password: Option<String>,
}

impl LoginRequest {
    /// Payload of the first login step
    pub fn new(credentials: &Credentials) -> Self {
        Self {
            username: credentials.username.clone(),
            password: credentials.password.clone(),
            is_redirect_to_mobile: false,
            is_pass_code_reset: String::new(),
            query_params: LoginQueryParams {
                reason: "session_expired".to_string(),
            },
            one_time_password: None,
        }
    }

    /// Same payload carrying a one-time password
    #[must_use]
    pub fn with_one_time_password(mut self, code: String) -> Self {
        self.one_time_password = Some(code);
        self
    }
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"***")
            .field("one_time_password", &self.one_time_password.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Body of a login response
///
/// Every field is optional: a successful login may carry nothing but the
/// session cookie.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Login status code, 0 on success
    pub status: Option<i64>,
    /// Textual status, e.g. `badCredentials` or `totpNeeded`
    pub status_text: Option<String>,
    /// Session identifier, duplicated from the cookie by some servers
    pub session_id: Option<String>,
}

impl LoginResponse {
    /// Parses a body leniently, an unreadable body gives an empty response
    #[must_use]
    pub fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }
}
