use crate::application::auth::Session;
use crate::application::config::Credentials;
use crate::error::AppError;
use async_trait::async_trait;
use serde_json::Value;

/// Interface for session establishment
#[async_trait]
pub trait SessionService: Send + Sync {
    /// Logs in and fetches everything later calls need
    ///
    /// Runs the login, then fetches the configuration, the account owner and
    /// the product dictionary. The returned session is immutable and can be
    /// shared between tasks.
    ///
    /// # Errors
    /// * [`AppError::BadCredentials`] if the username or password is wrong
    /// * [`AppError::SecondFactorRequired`] if the account needs a one-time
    ///   password and `credentials` carries neither a code nor a secret
    /// * [`AppError::InvalidSecondFactor`] if the one-time password is rejected
    async fn login(&self, credentials: &Credentials) -> Result<Session, AppError>;

    /// Account details, returned as sent by the server
    async fn get_account_info(&self, session: &Session) -> Result<Value, AppError>;
}
