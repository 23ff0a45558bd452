//! Retry-policy behavior against a mock server.

use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sideshift_api_client::SideShiftClient;
use sideshift_api_client::error::SideShiftError;

/// Client with a fast retry schedule so tests complete quickly.
fn build_client(server: &MockServer, max_retries: u32) -> SideShiftClient {
    SideShiftClient::builder("test-secret", "test-affiliate")
        .base_url(server.uri())
        .max_retries(max_retries)
        .retry_delay(Duration::from_millis(5))
        .retry_capped_delay(Duration::from_millis(10))
        .timeout(Duration::from_millis(250))
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_get_retries_on_429_then_succeeds() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/coins"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/coins"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let client = build_client(&server, 5);
    let coins = client.get_coins().await.unwrap();
    assert!(coins.is_empty());
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_server_error_surfaces_without_retry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/coins"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(serde_json::json!({ "error": { "message": "boom" } })),
        )
        .mount(&server)
        .await;

    let client = build_client(&server, 5);
    let error = client.get_coins().await.unwrap_err();
    match error {
        SideShiftError::Api(failure) => assert_eq!(failure.status, Some(500)),
        other => panic!("expected Api error, got {other:?}"),
    }
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_not_found_surfaces_without_retry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/shifts/nope"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;

    let client = build_client(&server, 5);
    let error = client.get_shift("nope").await.unwrap_err();
    assert!(matches!(error, SideShiftError::Api(_)));
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_post_is_never_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/cancel-order"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .mount(&server)
        .await;

    let client = build_client(&server, 5);
    let error = client.cancel_order("ord-1").await.unwrap_err();
    // The rate-limit error surfaces as-is rather than a retry-budget error.
    assert!(matches!(error, SideShiftError::Api(_)));
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_persistent_rate_limit_exhausts_budget() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/coins"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .mount(&server)
        .await;

    let client = build_client(&server, 2);
    let error = client.get_coins().await.unwrap_err();
    assert!(matches!(error, SideShiftError::RetriesExhausted));
    assert_eq!(error.to_string(), "max retry timeout exceeded");
    // Initial attempt plus two retries.
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_slow_responses_time_out_and_exhaust_budget() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/coins"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([]))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let client = SideShiftClient::builder("test-secret", "test-affiliate")
        .base_url(server.uri())
        .max_retries(1)
        .retry_delay(Duration::from_millis(5))
        .retry_capped_delay(Duration::from_millis(10))
        .timeout(Duration::from_millis(50))
        .build()
        .unwrap();
    let error = client.get_coins().await.unwrap_err();
    assert!(matches!(error, SideShiftError::RetriesExhausted));
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_malformed_body_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/coins"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = build_client(&server, 5);
    let error = client.get_coins().await.unwrap_err();
    assert!(matches!(error, SideShiftError::Shape(_)));
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_icon_requests_retry_on_429() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/coins/icon/btc"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/coins/icon/btc"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(b"<svg/>".to_vec(), "image/svg+xml"))
        .mount(&server)
        .await;

    let client = build_client(&server, 5);
    let bytes = client.get_coin_icon("btc").await.unwrap();
    assert_eq!(bytes, b"<svg/>");
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}
