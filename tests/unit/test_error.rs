use degiroasync::error::{AppError, ValidationError};
use reqwest::StatusCode;
use std::error::Error;

#[test]
fn test_app_error_display_bad_credentials() {
    assert_eq!(AppError::BadCredentials.to_string(), "bad credentials");
}

#[test]
fn test_app_error_display_session_expired() {
    assert_eq!(AppError::SessionExpired.to_string(), "session expired");
}

#[test]
fn test_app_error_display_second_factor() {
    assert!(
        AppError::SecondFactorRequired
            .to_string()
            .starts_with("second factor required")
    );
    assert_eq!(
        AppError::InvalidSecondFactor.to_string(),
        "invalid second factor"
    );
}

#[test]
fn test_app_error_display_invalid_input() {
    let error = AppError::InvalidInput("size must be positive".to_string());
    assert_eq!(error.to_string(), "invalid input: size must be positive");
}

#[test]
fn test_app_error_display_response() {
    let error = AppError::Response {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        url: "https://trader.degiro.nl/login/secure/config".to_string(),
        body: "{\"errors\":[]}".to_string(),
    };
    let text = error.to_string();
    assert!(text.contains("500"));
    assert!(text.contains("login/secure/config"));
    assert!(text.contains("{\"errors\":[]}"));
    assert_eq!(error.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
}

#[test]
fn test_validation_error_names_the_field() {
    let error = ValidationError::new("Position", "size", "number", "missing");
    assert_eq!(
        error.to_string(),
        "invalid Position: field `size` expected number, found missing"
    );

    let app_error: AppError = error.clone().into();
    assert!(matches!(&app_error, AppError::Validation(e) if e == &error));
    assert!(app_error.to_string().contains("`size`"));
    assert!(app_error.source().is_some());
}

#[test]
fn test_app_error_from_serde() {
    let serde_error = serde_json::from_str::<serde_json::Value>("{\"invalid\": json}").unwrap_err();
    let app_error: AppError = serde_error.into();
    assert!(matches!(app_error, AppError::Json(_)));
    assert!(app_error.to_string().starts_with("json error"));
}

#[test]
fn test_error_categories() {
    for error in [
        AppError::BadCredentials,
        AppError::SecondFactorRequired,
        AppError::InvalidSecondFactor,
        AppError::InvalidSecret("bad".to_string()),
        AppError::MissingSessionCookie,
        AppError::SessionExpired,
    ] {
        assert!(error.is_auth(), "{error} should be an auth error");
        assert!(!error.is_transport());
    }

    let response = AppError::Response {
        status: StatusCode::BAD_GATEWAY,
        url: String::new(),
        body: String::new(),
    };
    assert!(response.is_transport());
    assert!(!response.is_auth());

    let invalid = AppError::InvalidInput("x".to_string());
    assert!(!invalid.is_auth());
    assert!(!invalid.is_transport());
    assert_eq!(invalid.status(), None);
}
