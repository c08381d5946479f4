use crate::common::*;
use chrono::Utc;
use degiroasync::constants::TOTP_STEP_SECONDS;
use degiroasync::prelude::*;
use degiroasync::utils::otp::totp_window;
use degiroasync::webapi::login::session_cookie;
use mockito::{Matcher, Server};
use reqwest::header::{HeaderMap, HeaderValue, SET_COOKIE};
use serde_json::json;

// base32 of the ASCII key "12345678901234567890"
const TOTP_SECRET: &str = "GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ";

fn unix_now() -> u64 {
    u64::try_from(Utc::now().timestamp()).unwrap()
}

#[test]
fn test_session_cookie_among_others() {
    let mut headers = HeaderMap::new();
    headers.append(SET_COOKIE, HeaderValue::from_static("locale=fr_FR; Path=/"));
    headers.append(
        SET_COOKIE,
        HeaderValue::from_static("JSESSIONID=4F3A8C.prod_b_112_1; Path=/; Secure; HttpOnly"),
    );
    assert_eq!(session_cookie(&headers).as_deref(), Some(JSESSIONID));
}

#[tokio::test]
async fn test_webapi_login_returns_core_only() {
    let mut server = Server::new_async().await;
    let _login = server
        .mock("POST", "/login/secure/login")
        .with_status(200)
        .with_header("set-cookie", &format!("JSESSIONID={JSESSIONID}; Path=/"))
        .with_body(r#"{"status":0}"#)
        .create_async()
        .await;

    let webapi = WebApi::new(test_config(&server.url())).unwrap();
    let credentials = Credentials::new("test_user", "test_password");
    let core = webapi.login(&credentials).await.unwrap();
    assert_eq!(core, SessionCore::new(JSESSIONID));
}

#[tokio::test]
async fn test_totp_step_forwards_first_cookie() {
    let mut server = Server::new_async().await;
    let _login = server
        .mock("POST", "/login/secure/login")
        .with_status(202)
        .with_header("set-cookie", "JSESSIONID=PRELOGIN; Path=/")
        .with_body(r#"{"status":6,"statusText":"totpNeeded"}"#)
        .create_async()
        .await;
    let totp = server
        .mock("POST", "/login/secure/login/totp")
        .match_header("cookie", "JSESSIONID=PRELOGIN")
        .with_status(200)
        .with_header("set-cookie", &format!("JSESSIONID={JSESSIONID}; Path=/"))
        .with_body(r#"{"status":0}"#)
        .create_async()
        .await;

    let webapi = WebApi::new(test_config(&server.url())).unwrap();
    let credentials =
        Credentials::new("test_user", "test_password").with_one_time_password("123456");
    let core = webapi.login(&credentials).await.unwrap();
    totp.assert_async().await;
    assert_eq!(core.jsessionid(), JSESSIONID);
}

#[tokio::test]
async fn test_raw_config_and_dictionary() {
    let mut server = Server::new_async().await;
    let url = server.url();
    let _setup = mock_session_setup(&mut server, &url).await;

    let webapi = WebApi::new(test_config(&url)).unwrap();
    let core = SessionCore::new(JSESSIONID);
    let config = webapi.get_config(&core).await.unwrap();
    assert_eq!(config, config_json(&url));

    let pa_url = config["data"]["paUrl"].as_str().unwrap();
    let client = webapi.get_client_info(&core, pa_url, JSESSIONID).await.unwrap();
    assert_eq!(client["data"]["intAccount"], json!(INT_ACCOUNT));

    let dictionary_url = config["data"]["dictionaryUrl"].as_str().unwrap();
    let dictionary = webapi
        .get_product_dictionary(&core, dictionary_url, INT_ACCOUNT, JSESSIONID)
        .await
        .unwrap();
    assert_eq!(dictionary, dictionary_json());
}

#[tokio::test]
async fn test_charting_call_sends_no_cookie() {
    let mut server = Server::new_async().await;
    let session = offline_session(&server.url());
    let chart = server
        .mock("GET", "/hchart/v1/deGiro/data.js")
        .match_query(Matcher::Any)
        .match_header("cookie", Matcher::Missing)
        .with_status(200)
        .with_body(r#"{"series":[]}"#)
        .create_async()
        .await;

    let webapi = WebApi::new(test_config(&server.url())).unwrap();
    let request =
        PriceSeriesRequest::for_product(&airbus(), TimeSpan::P1D, TimeSpan::P1Y, PriceType::Price)
            .unwrap();
    let raw = webapi.get_price_series(&session, &request).await.unwrap();
    chart.assert_async().await;
    assert_eq!(raw["series"], json!([]));
}

#[tokio::test]
async fn test_charting_unauthorized_is_not_session_expired() {
    let mut server = Server::new_async().await;
    let session = offline_session(&server.url());
    let _chart = server
        .mock("GET", "/hchart/v1/deGiro/data.js")
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body("invalid user token")
        .create_async()
        .await;

    let webapi = WebApi::new(test_config(&server.url())).unwrap();
    let request =
        PriceSeriesRequest::for_product(&airbus(), TimeSpan::P1D, TimeSpan::P1Y, PriceType::Price)
            .unwrap();
    let err = webapi.get_price_series(&session, &request).await.unwrap_err();
    match err {
        AppError::Response { status, url, body } => {
            assert_eq!(status.as_u16(), 401);
            assert_eq!(body, "invalid user token");
            assert!(!url.contains('?'), "query kept in {url}");
            assert!(!url.contains("userToken"));
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[tokio::test]
async fn test_totp_code_is_derived_when_sent() {
    let mut server = Server::new_async().await;
    let _login = server
        .mock("POST", "/login/secure/login")
        .with_status(202)
        .with_header("set-cookie", "JSESSIONID=PRELOGIN; Path=/")
        .with_body(r#"{"status":6,"statusText":"totpNeeded"}"#)
        .create_async()
        .await;
    // Accepts only the code of the window the request arrives in, with one
    // second of slack for a boundary crossed in flight.
    let totp = server
        .mock("POST", "/login/secure/login/totp")
        .match_request(|request| {
            let Ok(body) = request.body() else {
                return false;
            };
            let Ok(payload) = serde_json::from_slice::<Value>(body) else {
                return false;
            };
            let sent = payload["oneTimePassword"].as_str();
            let now = unix_now();
            [now, now.saturating_sub(1)]
                .iter()
                .any(|at| generate_totp(TOTP_SECRET, *at).ok().as_deref() == sent)
        })
        .with_status(200)
        .with_header("set-cookie", &format!("JSESSIONID={JSESSIONID}; Path=/"))
        .with_body(r#"{"status":0}"#)
        .create_async()
        .await;

    // One request per period, the period ending just past the next window
    // boundary: the TOTP step is held back into the following window.
    let started = unix_now();
    let mut config = test_config(&server.url());
    config.rate_limiter = RateLimiterConfig {
        max_requests: 1,
        period_seconds: TOTP_STEP_SECONDS - started % TOTP_STEP_SECONDS + 1,
        burst_size: 1,
    };
    let webapi = WebApi::new(config).unwrap();
    let credentials = Credentials::new("test_user", "test_password").with_totp_secret(TOTP_SECRET);

    let core = webapi.login(&credentials).await.unwrap();
    totp.assert_async().await;
    assert_eq!(core.jsessionid(), JSESSIONID);
    assert!(totp_window(unix_now()) > totp_window(started));
}
