use crate::application::auth::{AccountClient, Session, SessionConfig};
use crate::application::client::Client;
use crate::application::config::Credentials;
use crate::application::interfaces::session::SessionService;
use crate::error::AppError;
use crate::presentation::dictionary::ExchangeDictionary;
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info};

#[async_trait]
impl SessionService for Client {
    async fn login(&self, credentials: &Credentials) -> Result<Session, AppError> {
        let webapi = self.webapi();
        let core = webapi.login(credentials).await?;

        let config = SessionConfig::from_json(&webapi.get_config(&core).await?)?;
        debug!("Session configuration obtained for client {}", config.client_id);

        let client = AccountClient::from_json(
            &webapi
                .get_client_info(&core, &config.pa_url, &config.session_id)
                .await?,
        )?;

        let dictionary = ExchangeDictionary::from_json(
            &webapi
                .get_product_dictionary(
                    &core,
                    &config.dictionary_url,
                    client.int_account,
                    &config.session_id,
                )
                .await?,
        )?;
        debug!(
            "Dictionary obtained: {} exchanges, {} indices",
            dictionary.exchanges.len(),
            dictionary.indices.len()
        );

        info!("Session ready for account {}", client.int_account);
        Ok(Session::new(core, config, client, dictionary))
    }

    async fn get_account_info(&self, session: &Session) -> Result<Value, AppError> {
        info!("Getting account information");
        self.webapi().get_account_info(session).await
    }
}
