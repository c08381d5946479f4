use crate::application::config::Config;
use crate::application::rate_limiter::RateLimiter;
use crate::constants::{LOGIN_STATUS_BAD_CREDENTIALS, SESSION_COOKIE, USER_AGENT};
use crate::error::AppError;
use crate::model::utils::redact_url;
use reqwest::{Client, Method, Response, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

/// Raw HTTP transport shared by every endpoint
///
/// Wraps a `reqwest` client with the configured timeout and a rate limiter.
/// It carries no session: the session cookie is passed per call.
#[derive(Debug, Clone)]
pub struct HttpClient {
    http_client: Client,
    rate_limiter: RateLimiter,
    config: Arc<Config>,
}

impl HttpClient {
    /// Creates the transport from a configuration
    pub fn new(config: Arc<Config>) -> Result<Self, AppError> {
        let http_client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.rest_api.timeout))
            .build()?;
        let rate_limiter = RateLimiter::new(&config.rate_limiter);
        Ok(Self {
            http_client,
            rate_limiter,
            config,
        })
    }

    /// Configuration in use
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Sends a request and returns the response whatever its status
    pub async fn send<B: Serialize>(
        &self,
        method: Method,
        url: &str,
        jsessionid: Option<&str>,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<Response, AppError> {
        self.rate_limiter.wait().await;
        self.dispatch(method, url, jsessionid, query, body).await
    }

    /// Sends a request whose body is built once the rate limiter lets it through
    ///
    /// Used for payloads only valid for a short time, such as a one-time
    /// password derived from a TOTP secret. Nothing is awaited between
    /// building the body and sending it.
    pub async fn send_with<B, F>(
        &self,
        method: Method,
        url: &str,
        jsessionid: Option<&str>,
        query: &[(&str, String)],
        build_body: F,
    ) -> Result<Response, AppError>
    where
        B: Serialize,
        F: FnOnce() -> Result<B, AppError>,
    {
        self.rate_limiter.wait().await;
        let body = build_body()?;
        self.dispatch(method, url, jsessionid, query, Some(&body)).await
    }

    async fn dispatch<B: Serialize>(
        &self,
        method: Method,
        url: &str,
        jsessionid: Option<&str>,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<Response, AppError> {
        let cookie = jsessionid.map(|id| format!("{SESSION_COOKIE}={id}"));
        let mut headers = vec![("Accept", "application/json")];
        if let Some(cookie) = cookie.as_deref() {
            headers.push(("Cookie", cookie));
        }
        make_http_request(&self.http_client, method, url, &headers, query, body).await
    }

    /// GET returning the decoded JSON body of a successful response
    pub async fn get_json(
        &self,
        url: &str,
        jsessionid: Option<&str>,
        query: &[(&str, String)],
    ) -> Result<Value, AppError> {
        let response = self
            .send(Method::GET, url, jsessionid, query, None::<&()>)
            .await?;
        check_response(response, jsessionid.is_some()).await
    }

    /// POST with a JSON body, returning the decoded JSON body of a successful response
    pub async fn post_json<B: Serialize>(
        &self,
        url: &str,
        jsessionid: Option<&str>,
        query: &[(&str, String)],
        body: &B,
    ) -> Result<Value, AppError> {
        let response = self
            .send(Method::POST, url, jsessionid, query, Some(body))
            .await?;
        check_response(response, jsessionid.is_some()).await
    }
}

/// Makes an HTTP request
///
/// No status handling happens here: the response is returned as is so callers
/// that need to look at error bodies (login) can do so. Use
/// [`check_response`] to turn it into JSON or an error. Throttling is the
/// caller's job, see [`HttpClient::send`]. Nothing is retried.
///
/// # Arguments
///
/// * `client` - The `reqwest` client sending the request
/// * `method` - HTTP method
/// * `url` - Full URL, path parameters included
/// * `headers` - Extra headers, such as the session cookie
/// * `query` - Query string pairs, skipped when empty
/// * `body` - Optional JSON body
///
/// # Returns
///
/// The raw response, or [`AppError::Network`] if it could not be obtained
pub async fn make_http_request<B: Serialize>(
    client: &Client,
    method: Method,
    url: &str,
    headers: &[(&str, &str)],
    query: &[(&str, String)],
    body: Option<&B>,
) -> Result<Response, AppError> {
    debug!("{} {}", method, redact_url(url));
    let mut request = client.request(method, url);
    for (name, value) in headers {
        request = request.header(*name, *value);
    }
    if !query.is_empty() {
        request = request.query(query);
    }
    if let Some(b) = body {
        request = request.json(b);
    }

    let response = request.send().await?;
    debug!("Response status: {}", response.status());
    Ok(response)
}

/// Reads the body of `response` and maps its status
///
/// `authenticated` tells whether a session cookie was sent. See
/// [`parse_response_body`] and [`parse_unauthenticated_body`] for the
/// status mapping.
pub async fn check_response(response: Response, authenticated: bool) -> Result<Value, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let body = response.text().await?;
    if authenticated {
        parse_response_body(status, &url, body)
    } else {
        parse_unauthenticated_body(status, &url, body)
    }
}

/// Maps a status and body to decoded JSON or an error
///
/// - 200 and 201: the body is decoded, an empty body gives `Value::Null`
/// - 401: [`AppError::SessionExpired`]
/// - 400 with a JSON `status` of 3: [`AppError::BadCredentials`]
/// - anything else: [`AppError::Response`] carrying the body unmodified
///
/// The URL kept in errors and logs has its query and `;jsessionid=`
/// parameter removed.
pub fn parse_response_body(
    status: StatusCode,
    url: &str,
    body: String,
) -> Result<Value, AppError> {
    match status {
        StatusCode::OK | StatusCode::CREATED => {
            if body.trim().is_empty() {
                return Ok(Value::Null);
            }
            Ok(serde_json::from_str(&body)?)
        }
        StatusCode::UNAUTHORIZED => {
            error!("Unauthorized on {}: session expired or revoked", redact_url(url));
            Err(AppError::SessionExpired)
        }
        StatusCode::BAD_REQUEST if login_status(&body) == Some(LOGIN_STATUS_BAD_CREDENTIALS) => {
            error!("Bad credentials");
            Err(AppError::BadCredentials)
        }
        _ => Err(failed_response(status, url, body)),
    }
}

/// Same as [`parse_response_body`] for calls made without a session
///
/// There is no session to expire, so a 401 is reported as
/// [`AppError::Response`].
pub fn parse_unauthenticated_body(
    status: StatusCode,
    url: &str,
    body: String,
) -> Result<Value, AppError> {
    match status {
        StatusCode::UNAUTHORIZED => Err(failed_response(status, url, body)),
        _ => parse_response_body(status, url, body),
    }
}

fn failed_response(status: StatusCode, url: &str, body: String) -> AppError {
    let url = redact_url(url);
    error!("Request to {} failed with status {}: {}", url, status, body);
    AppError::Response { status, url, body }
}

/// Value of the `status` field of a JSON body, if any
#[must_use]
pub fn login_status(body: &str) -> Option<i64> {
    serde_json::from_str::<Value>(body)
        .ok()?
        .get("status")?
        .as_i64()
}
