use degiroasync::prelude::*;
use std::env;

#[test]
fn test_config_from_environment() {
    unsafe {
        env::set_var("DEGIRO_USERNAME", "env_user");
        env::set_var("DEGIRO_PASSWORD", "env_password");
        env::set_var("DEGIRO_TOTP_SECRET", "GEZDGNBVGY3TQOJQ");
        env::set_var("DEGIRO_BASE_URL", "http://127.0.0.1:9999");
        env::set_var("DEGIRO_REST_TIMEOUT", "5");
        env::set_var("DEGIRO_RATE_LIMIT_MAX_REQUESTS", "not a number");
    }

    let config = Config::new();
    assert_eq!(config.credentials.username, "env_user");
    assert_eq!(config.credentials.password, "env_password");
    assert_eq!(config.credentials.totp_secret.as_deref(), Some("GEZDGNBVGY3TQOJQ"));
    assert_eq!(config.credentials.one_time_password, None);
    assert_eq!(config.rest_api.base_url, "http://127.0.0.1:9999");
    assert_eq!(config.rest_api.timeout, 5);
    assert_eq!(config.rate_limiter.max_requests, 10);

    unsafe {
        for name in [
            "DEGIRO_USERNAME",
            "DEGIRO_PASSWORD",
            "DEGIRO_TOTP_SECRET",
            "DEGIRO_BASE_URL",
            "DEGIRO_REST_TIMEOUT",
            "DEGIRO_RATE_LIMIT_MAX_REQUESTS",
        ] {
            env::remove_var(name);
        }
    }
}

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.rest_api.base_url, "https://trader.degiro.nl");
    assert!(config.rest_api.charting_url.starts_with("https://charting.vwdservices.com"));
    assert_eq!(config.credentials, Credentials::default());
}

#[test]
fn test_client_exposes_endpoint_layer() {
    let config = Config::default().with_base_url("http://localhost:1");
    let client = Client::new(config).unwrap();
    assert_eq!(client.webapi().config().rest_api.base_url, "http://localhost:1");
}
