use crate::application::config::Config;
use crate::error::AppError;
use crate::webapi::WebApi;

/// High-level client
///
/// Implements the service traits on top of the endpoint layer. It owns the
/// transport only: sessions are returned to the caller and passed back in.
///
/// # Example
///
/// ```no_run
/// use degiroasync::prelude::*;
///
/// #[tokio::main]
/// async fn main() -> Result<(), AppError> {
///     let config = Config::new();
///     let client = Client::new(config.clone())?;
///     let session = client.login(&config.credentials).await?;
///
///     let portfolio = client.get_portfolio(&session).await?;
///     println!("{portfolio}");
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    webapi: WebApi,
}

impl Client {
    /// Creates a client for a configuration
    ///
    /// # Arguments
    ///
    /// * `config` - URLs, timeout and rate limits. The credentials it holds
    ///   are not used until [`SessionService::login`] is called with them.
    ///
    /// # Returns
    ///
    /// The client, or [`AppError::Network`] if the HTTP client cannot be built
    ///
    /// [`SessionService::login`]: crate::application::services::SessionService::login
    pub fn new(config: Config) -> Result<Self, AppError> {
        Ok(Self {
            webapi: WebApi::new(config)?,
        })
    }

    /// Endpoint layer, for calls the services do not cover
    #[must_use]
    pub fn webapi(&self) -> &WebApi {
        &self.webapi
    }
}
