use crate::common::*;
use degiroasync::prelude::*;
use mockito::{Matcher, Server};
use serde_json::json;

const LOOKUP_PATH: &str = "/product_search/secure/v5/products/lookup";
const INFO_PATH: &str = "/product_search/secure/v5/products/info";
const CHART_PATH: &str = "/hchart/v1/deGiro/data.js";

fn product(id: usize, symbol: &str, exchange_id: &str) -> Value {
    json!({
        "id": id.to_string(),
        "name": format!("PRODUCT {id}"),
        "isin": format!("FR{id:010}"),
        "symbol": symbol,
        "currency": "EUR",
        "exchangeId": exchange_id,
        "productTypeId": 1,
        "tradable": true
    })
}

#[tokio::test]
async fn test_get_products_info_batches_requests() {
    let mut server = Server::new_async().await;
    let session = offline_session(&server.url());
    let client = Client::new(test_config(&server.url())).unwrap();

    let ids: Vec<String> = (1..=60).map(|i| i.to_string()).collect();
    let data: serde_json::Map<String, Value> = (1..=60)
        .map(|i| (i.to_string(), product(i, &format!("S{i}"), "710")))
        .collect();
    let first_batch: Vec<String> = ids[..50].to_vec();
    let second_batch: Vec<String> = ids[50..].to_vec();

    let first = server
        .mock("POST", INFO_PATH)
        .match_query(Matcher::Any)
        .match_body(Matcher::Json(json!(first_batch)))
        .with_status(200)
        .with_body(json!({"data": data}).to_string())
        .create_async()
        .await;
    let second = server
        .mock("POST", INFO_PATH)
        .match_query(Matcher::Any)
        .match_body(Matcher::Json(json!(second_batch)))
        .with_status(200)
        .with_body(json!({"data": data}).to_string())
        .create_async()
        .await;

    let products = client.get_products_info(&session, &ids).await.unwrap();
    first.assert_async().await;
    second.assert_async().await;
    assert_eq!(products.len(), 60);
    assert_eq!(products[0].id, "1");
    assert_eq!(products[59].id, "60");
}

#[tokio::test]
async fn test_get_products_info_empty() {
    let mut server = Server::new_async().await;
    let session = offline_session(&server.url());
    let client = Client::new(test_config(&server.url())).unwrap();
    let info = server
        .mock("POST", INFO_PATH)
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    assert!(client.get_products_info(&session, &[]).await.unwrap().is_empty());
    info.assert_async().await;
}

#[tokio::test]
async fn test_search_pages_until_short_page() {
    let mut server = Server::new_async().await;
    let session = offline_session(&server.url());
    let client = Client::new(test_config(&server.url())).unwrap();

    let page0 = server
        .mock("GET", LOOKUP_PATH)
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("searchText".into(), "air".into()),
            Matcher::UrlEncoded("offset".into(), "0".into()),
            Matcher::UrlEncoded("limit".into(), "2".into()),
            Matcher::UrlEncoded("productTypeId".into(), "1".into()),
        ]))
        .with_status(200)
        .with_body(
            json!({"products": [product(1, "AIR", "710"), product(2, "AIRX", "663")]}).to_string(),
        )
        .create_async()
        .await;
    let page1 = server
        .mock("GET", LOOKUP_PATH)
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("searchText".into(), "air".into()),
            Matcher::UrlEncoded("offset".into(), "2".into()),
        ]))
        .with_status(200)
        .with_body(json!({"products": [product(3, "AIRP", "710")]}).to_string())
        .create_async()
        .await;

    let query = SearchQuery::new(SearchBy::Text("air".into()))
        .with_exchange("EPA")
        .with_limit(2);
    let products = client.search_product(&session, &query).await.unwrap();
    page0.assert_async().await;
    page1.assert_async().await;

    let symbols: Vec<&str> = products.iter().map(|p| p.symbol.as_str()).collect();
    assert_eq!(symbols, ["AIR", "AIRP"]);
}

#[tokio::test]
async fn test_search_stops_at_max_pages() {
    let mut server = Server::new_async().await;
    let session = offline_session(&server.url());
    let client = Client::new(test_config(&server.url())).unwrap();

    let lookup = server
        .mock("GET", LOOKUP_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(json!({"products": [product(1, "AIR", "710")]}).to_string())
        .expect(3)
        .create_async()
        .await;

    let query = SearchQuery::new(SearchBy::Symbol("AIR".into()))
        .with_limit(1)
        .with_max_pages(3);
    let products = client.search_product(&session, &query).await.unwrap();
    lookup.assert_async().await;
    assert_eq!(products.len(), 3);
}

#[tokio::test]
async fn test_search_by_index_and_isin() {
    let mut server = Server::new_async().await;
    let session = offline_session(&server.url());
    let client = Client::new(test_config(&server.url())).unwrap();

    let by_index = server
        .mock("GET", LOOKUP_PATH)
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("indexId".into(), "5".into()),
            Matcher::UrlEncoded("searchText".into(), String::new()),
        ]))
        .with_status(200)
        .with_body(json!({"products": [airbus_json()]}).to_string())
        .create_async()
        .await;
    let products = client
        .search_product(&session, &SearchQuery::new(SearchBy::Index("CAC 40".into())))
        .await
        .unwrap();
    by_index.assert_async().await;
    assert_eq!(products.len(), 1);

    let by_isin = server
        .mock("GET", LOOKUP_PATH)
        .match_query(Matcher::UrlEncoded("searchText".into(), "NL0000235190".into()))
        .with_status(200)
        .with_body(json!({"products": [airbus_json(), apple_json()]}).to_string())
        .create_async()
        .await;
    let products = client
        .search_product(&session, &SearchQuery::new(SearchBy::Isin("NL0000235190".into())))
        .await
        .unwrap();
    by_isin.assert_async().await;
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].symbol, "AIR");
}

#[tokio::test]
async fn test_search_unknown_exchange_sends_nothing() {
    let mut server = Server::new_async().await;
    let session = offline_session(&server.url());
    let client = Client::new(test_config(&server.url())).unwrap();
    let lookup = server
        .mock("GET", LOOKUP_PATH)
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let query = SearchQuery::new(SearchBy::Text("air".into())).with_exchange("XXXX");
    let err = client.search_product(&session, &query).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));
    lookup.assert_async().await;
}

#[tokio::test]
async fn test_get_price_series() {
    let mut server = Server::new_async().await;
    let session = offline_session(&server.url());
    let client = Client::new(test_config(&server.url())).unwrap();

    let chart = server
        .mock("GET", CHART_PATH)
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("series".into(), "price:issueid:360114899".into()),
            Matcher::UrlEncoded("resolution".into(), "PT1M".into()),
            Matcher::UrlEncoded("period".into(), "P1D".into()),
            Matcher::UrlEncoded("userToken".into(), CLIENT_ID.to_string()),
        ]))
        .match_header("cookie", Matcher::Missing)
        .with_status(200)
        .with_body(
            json!({
                "resolution": "PT1M",
                "series": [{
                    "type": "time",
                    "times": "2023-07-05T00:00:00/PT1M",
                    "data": [[540, 130.1], [541, 130.3]]
                }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let series = client
        .get_price_series(&session, &airbus(), TimeSpan::PT1M, TimeSpan::P1D, PriceType::Price)
        .await
        .unwrap();
    chart.assert_async().await;
    assert_eq!(series.resolution, TimeSpan::PT1M);
    assert_eq!(series.period, TimeSpan::P1D);
    assert_eq!(series.len(), 2);
    assert_eq!(series.last().unwrap().price, 130.3);
}

#[tokio::test]
async fn test_get_price_series_returned_resolution_wins() {
    let mut server = Server::new_async().await;
    let session = offline_session(&server.url());
    let client = Client::new(test_config(&server.url())).unwrap();

    let _chart = server
        .mock("GET", CHART_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            json!({
                "resolution": "P1D",
                "series": [{
                    "type": "time",
                    "times": "2018-07-05T00:00:00/P1D",
                    "data": [[0, 95.0], [1, 96.5]]
                }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let series = client
        .get_price_series(&session, &airbus(), TimeSpan::PT1M, TimeSpan::P50Y, PriceType::Price)
        .await
        .unwrap();
    assert_eq!(series.resolution, TimeSpan::P1D);
    assert_eq!(series.period, TimeSpan::P50Y);
}

#[tokio::test]
async fn test_company_endpoints() {
    let mut server = Server::new_async().await;
    let session = offline_session(&server.url());
    let client = Client::new(test_config(&server.url())).unwrap();

    let profile = server
        .mock("GET", "/dgtbxdsservice/company-profile/v2/NL0000235190")
        .match_query(Matcher::UrlEncoded("intAccount".into(), INT_ACCOUNT.to_string()))
        .with_status(200)
        .with_body(r#"{"data":{"isin":"NL0000235190"}}"#)
        .create_async()
        .await;
    let news = server
        .mock("GET", "/dgtbxdsservice/newsfeed/v2/news-by-company")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("isin".into(), "NL0000235190".into()),
            Matcher::UrlEncoded("languages".into(), "en".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"data":{"items":[],"offset":0,"total":0}}"#)
        .create_async()
        .await;

    let raw = client
        .webapi()
        .get_company_profile(&session, "NL0000235190")
        .await
        .unwrap();
    assert_eq!(raw["data"]["isin"], "NL0000235190");
    let raw = client
        .webapi()
        .get_news_by_company(&session, &NewsRequest::new("NL0000235190"))
        .await
        .unwrap();
    assert_eq!(raw["data"]["total"], 0);
    profile.assert_async().await;
    news.assert_async().await;
}
