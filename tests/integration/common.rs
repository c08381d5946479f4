// Common utilities for integration tests

use degiroasync::prelude::*;
use degiroasync::utils::config::get_env_flag;

/// Environment switch enabling the tests in this directory
pub const INTEGRATION_FLAG: &str = "DEGIROASYNC_INTEGRATION";

/// True when live tests should run, logs the reason otherwise
pub fn integration_enabled() -> bool {
    setup_logger();
    if get_env_flag(INTEGRATION_FLAG) {
        return true;
    }
    info!("{} is not set, skipping live test", INTEGRATION_FLAG);
    false
}

/// Client configured from the environment, with its credentials
pub fn create_test_client() -> (Client, Credentials) {
    let config = Config::new();
    let credentials = config.credentials.clone();
    let client = Client::new(config).expect("Failed to build client");
    (client, credentials)
}

/// Logs in with the credentials found in the environment
pub async fn login() -> (Client, Session) {
    let (client, credentials) = create_test_client();
    let session = client
        .login(&credentials)
        .await
        .expect("Failed to login");
    info!("Logged in to account {}", session.int_account());
    (client, session)
}
