use crate::application::auth::{Session, SessionCore};
use crate::application::config::Credentials;
use crate::constants::{
    ACCOUNT_INFO_PATH, CONFIG_PATH, LOGIN_PATH, LOGIN_STATUS_TOTP_NEEDED, LOGIN_TOTP_PATH,
    SESSION_COOKIE,
};
use crate::error::AppError;
use crate::model::auth::{LoginRequest, LoginResponse};
use crate::model::http::parse_unauthenticated_body;
use crate::model::utils::{join_url, with_jsessionid};
use crate::webapi::WebApi;
use reqwest::{Method, StatusCode};
use reqwest::header::{HeaderMap, SET_COOKIE};
use serde_json::Value;
use tracing::{debug, error, info, warn};

/// Status, URL, session cookie and body of a login step
struct LoginReply {
    status: StatusCode,
    url: String,
    cookie: Option<String>,
    body: String,
}

impl WebApi {
    /// Authenticates and returns the session cookie
    ///
    /// When the server asks for a second factor, the one-time password from
    /// `credentials`, or one derived from its TOTP secret, is sent to the TOTP
    /// endpoint together with the cookie set by the first step. A derived code
    /// is computed only once that request is allowed through the rate limiter,
    /// so it is valid for the window it is sent in.
    ///
    /// # Arguments
    ///
    /// * `credentials` - Username, password and optional second factor
    ///
    /// # Returns
    ///
    /// The session cookie, or:
    /// * [`AppError::InvalidInput`] if both a code and a secret are given,
    ///   before anything is sent
    /// * [`AppError::BadCredentials`] if the username or password is rejected
    /// * [`AppError::SecondFactorRequired`] if the account needs a second
    ///   factor and `credentials` has none
    /// * [`AppError::InvalidSecondFactor`] if the one-time password is rejected
    /// * [`AppError::MissingSessionCookie`] if the server accepted the login
    ///   but sent no session identifier
    ///
    /// # Example
    ///
    /// ```no_run
    /// use degiroasync::prelude::*;
    ///
    /// # async fn run() -> Result<(), AppError> {
    /// let webapi = WebApi::new(Config::new())?;
    /// let credentials = Credentials::new("user", "secret").with_totp_secret("JBSWY3DPEHPK3PXP");
    /// let core = webapi.login(&credentials).await?;
    /// let config = webapi.get_config(&core).await?;
    /// println!("{}", config["data"]["clientId"]);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn login(&self, credentials: &Credentials) -> Result<SessionCore, AppError> {
        credentials.validate()?;
        let payload = LoginRequest::new(credentials);
        let base_url = &self.config().rest_api.base_url;

        let url = join_url(&[base_url, LOGIN_PATH]);
        info!("Logging in as {}", credentials.username);
        let mut reply = self.login_step(&url, None, || Ok(payload.clone())).await?;
        let first = LoginResponse::parse(&reply.body);
        debug!("Login status: {:?} {:?}", first.status, first.status_text);

        let mut totp_step = false;
        if first.status == Some(LOGIN_STATUS_TOTP_NEEDED) {
            if !credentials.has_second_factor() {
                warn!("Account requires a one-time password and none was provided");
                return Err(AppError::SecondFactorRequired);
            }
            let url = join_url(&[base_url, LOGIN_TOTP_PATH]);
            debug!("Running TOTP login at {}", url);
            let first_cookie = reply.cookie.take();
            reply = self
                .login_step(&url, first_cookie.as_deref(), || {
                    let code = credentials
                        .second_factor()?
                        .ok_or(AppError::SecondFactorRequired)?;
                    Ok(payload.clone().with_one_time_password(code))
                })
                .await?;
            totp_step = true;
        }

        let parsed = match reply.status {
            StatusCode::UNAUTHORIZED => Err(AppError::BadCredentials),
            _ => parse_unauthenticated_body(reply.status, &reply.url, reply.body),
        };
        let session_id = match parsed {
            Ok(value) => value
                .get("sessionId")
                .and_then(Value::as_str)
                .map(str::to_string),
            Err(AppError::BadCredentials) if totp_step => {
                return Err(AppError::InvalidSecondFactor);
            }
            Err(e) => return Err(e),
        };

        match reply.cookie.or(session_id) {
            Some(jsessionid) => {
                info!("Login successful");
                Ok(SessionCore::new(jsessionid))
            }
            None => {
                error!("No {} in login response", SESSION_COOKIE);
                Err(AppError::MissingSessionCookie)
            }
        }
    }

    async fn login_step<F>(
        &self,
        url: &str,
        jsessionid: Option<&str>,
        payload: F,
    ) -> Result<LoginReply, AppError>
    where
        F: FnOnce() -> Result<LoginRequest, AppError>,
    {
        let response = self
            .http()
            .send_with(Method::POST, url, jsessionid, &[], payload)
            .await?;
        let status = response.status();
        let url = response.url().to_string();
        let cookie = session_cookie(response.headers());
        let body = response.text().await?;
        Ok(LoginReply {
            status,
            url,
            cookie,
            body,
        })
    }

    /// Service URLs and session identifier of the account
    pub async fn get_config(&self, core: &SessionCore) -> Result<Value, AppError> {
        let url = join_url(&[&self.config().rest_api.base_url, CONFIG_PATH]);
        self.http()
            .get_json(&url, Some(core.jsessionid()), &[])
            .await
    }

    /// Account owner information, `pa_url` comes from the configuration
    pub async fn get_client_info(
        &self,
        core: &SessionCore,
        pa_url: &str,
        session_id: &str,
    ) -> Result<Value, AppError> {
        let url = join_url(&[pa_url, "client"]);
        self.http()
            .get_json(
                &url,
                Some(core.jsessionid()),
                &[("sessionId", session_id.to_string())],
            )
            .await
    }

    /// Account details: base currency, margin type, etc.
    pub async fn get_account_info(&self, session: &Session) -> Result<Value, AppError> {
        let url = join_url(&[
            &self.config().rest_api.base_url,
            ACCOUNT_INFO_PATH,
            &session.int_account().to_string(),
        ]);
        self.http()
            .get_json(
                &with_jsessionid(&url, session.jsessionid()),
                Some(session.jsessionid()),
                &[],
            )
            .await
    }

    /// Regions, countries, exchanges and indices used to describe products
    pub async fn get_product_dictionary(
        &self,
        core: &SessionCore,
        dictionary_url: &str,
        int_account: i64,
        session_id: &str,
    ) -> Result<Value, AppError> {
        self.http()
            .get_json(
                dictionary_url,
                Some(core.jsessionid()),
                &[
                    ("intAccount", int_account.to_string()),
                    ("sessionId", session_id.to_string()),
                ],
            )
            .await
    }
}

/// Value of the `JSESSIONID` cookie set by a response, if any
pub fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|cookie| cookie.split(';').next())
        .filter_map(|pair| pair.split_once('='))
        .find(|(name, _)| name.trim() == SESSION_COOKIE)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
