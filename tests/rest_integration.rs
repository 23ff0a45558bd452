use rust_decimal::Decimal;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sideshift_api_client::SideShiftClient;
use sideshift_api_client::error::SideShiftError;
use sideshift_api_client::types::{RefundAddressRequest, ShiftStatus, VariableShiftRequest};

fn build_client(server: &MockServer) -> SideShiftClient {
    SideShiftClient::builder("test-secret", "test-affiliate")
        .base_url(server.uri())
        .build()
        .unwrap()
}

fn shift_json(id: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "createdAt": "2024-03-01T12:30:00.000Z",
        "depositCoin": "BTC",
        "settleCoin": "ETH",
        "depositNetwork": "mainnet",
        "settleNetwork": "ethereum",
        "depositAddress": "bc1qxyz",
        "settleAddress": "0xabc",
        "depositMin": "0.0001",
        "depositMax": "2.5",
        "type": "variable",
        "status": "waiting"
    })
}

#[tokio::test]
async fn test_get_coins() {
    let server = MockServer::start().await;
    let response = serde_json::json!([
        { "coin": "BTC", "name": "Bitcoin", "networks": ["mainnet"], "hasMemo": false },
        { "coin": "ETH", "name": "Ethereum", "networks": ["ethereum"], "hasMemo": false }
    ]);

    Mock::given(method("GET"))
        .and(path("/coins"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let coins = client.get_coins().await.unwrap();
    assert_eq!(coins.len(), 2);
    assert_eq!(coins[0].coin, "BTC");
}

#[tokio::test]
async fn test_get_pair_sends_affiliate_query() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "min": "0.0001",
        "max": "2.5",
        "rate": "17.1578",
        "depositCoin": "BTC",
        "settleCoin": "ETH",
        "depositNetwork": "mainnet",
        "settleNetwork": "ethereum"
    });

    Mock::given(method("GET"))
        .and(path("/pair/btc-mainnet/eth-ethereum"))
        .and(query_param("affiliateId", "test-affiliate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let pair = client
        .get_pair("btc-mainnet", "eth-ethereum", None)
        .await
        .unwrap();
    assert_eq!(pair.rate, "17.1578".parse::<Decimal>().unwrap());
}

#[tokio::test]
async fn test_custom_commission_rate_sent_as_header() {
    let server = MockServer::start().await;
    let response = serde_json::json!([]);

    Mock::given(method("GET"))
        .and(path("/pairs"))
        .and(header("commissionRate", "0.3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = SideShiftClient::builder("test-secret", "test-affiliate")
        .base_url(server.uri())
        .commission_rate("0.3")
        .build()
        .unwrap();
    client.get_pairs(&["btc-mainnet", "eth"]).await.unwrap();
}

#[tokio::test]
async fn test_default_commission_rate_sends_no_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pairs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let client = build_client(&server);
    client.get_pairs(&["btc-mainnet", "eth"]).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("commissionRate"));
}

#[tokio::test]
async fn test_get_account_sends_secret_header() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "id": "test-affiliate",
        "lifetimeStakingRewards": "0",
        "unstaking": "0",
        "staked": "100",
        "available": "5.5",
        "totalBalance": "105.5"
    });

    Mock::given(method("GET"))
        .and(path("/account"))
        .and(header("x-sideshift-secret", "test-secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let account = client.get_account().await.unwrap();
    assert_eq!(account.id, "test-affiliate");
}

#[tokio::test]
async fn test_get_bulk_shifts_joins_ids() {
    let server = MockServer::start().await;
    let response = serde_json::json!([shift_json("aaa"), shift_json("bbb")]);

    Mock::given(method("GET"))
        .and(path("/shifts"))
        .and(query_param("ids", "aaa,bbb"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let shifts = client.get_bulk_shifts(&["aaa", "bbb"]).await.unwrap();
    assert_eq!(shifts.len(), 2);
    assert_eq!(shifts[1].id, "bbb");
}

#[tokio::test]
async fn test_get_recent_shifts_clamps_limit() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/recent-shifts"))
        .and(query_param("limit", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let shifts = client.get_recent_shifts(Some(500)).await.unwrap();
    assert!(shifts.is_empty());
}

#[tokio::test]
async fn test_create_variable_shift_injects_affiliate_into_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/shifts/variable"))
        .and(body_partial_json(serde_json::json!({
            "affiliateId": "test-affiliate",
            "settleAddress": "0xabc",
            "depositCoin": "btc"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(shift_json("new-shift")))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let request = VariableShiftRequest {
        settle_address: "0xabc".to_string(),
        settle_coin: "eth".to_string(),
        settle_network: "ethereum".to_string(),
        deposit_coin: "btc".to_string(),
        deposit_network: "mainnet".to_string(),
        refund_address: None,
        settle_memo: None,
        refund_memo: None,
        external_id: None,
        user_ip: None,
    };
    let shift = client.create_variable_shift(&request).await.unwrap();
    assert_eq!(shift.id, "new-shift");
    assert_eq!(shift.status, ShiftStatus::Waiting);
}

#[tokio::test]
async fn test_user_ip_forwarded_as_header() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/shifts/variable"))
        .and(header("x-user-ip", "203.0.113.7"))
        .respond_with(ResponseTemplate::new(201).set_body_json(shift_json("ip-shift")))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let request = VariableShiftRequest {
        settle_address: "0xabc".to_string(),
        settle_coin: "eth".to_string(),
        settle_network: "ethereum".to_string(),
        deposit_coin: "btc".to_string(),
        deposit_network: "mainnet".to_string(),
        refund_address: None,
        settle_memo: None,
        refund_memo: None,
        external_id: None,
        user_ip: Some("203.0.113.7".to_string()),
    };
    let shift = client.create_variable_shift(&request).await.unwrap();
    assert_eq!(shift.id, "ip-shift");
}

#[tokio::test]
async fn test_set_refund_address_targets_shift_url() {
    let server = MockServer::start().await;
    let mut response = shift_json("abc");
    response["refundAddress"] = serde_json::json!("bc1qrefund");

    Mock::given(method("POST"))
        .and(path("/shifts/abc/set-refund-address"))
        .and(body_partial_json(serde_json::json!({ "address": "bc1qrefund" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let request = RefundAddressRequest {
        shift_id: "abc".to_string(),
        refund_address: "bc1qrefund".to_string(),
        refund_memo: None,
    };
    let shift = client.set_refund_address(&request).await.unwrap();
    assert_eq!(shift.refund_address.as_deref(), Some("bc1qrefund"));
}

#[tokio::test]
async fn test_cancel_order_synthesizes_ack_from_204() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/cancel-order"))
        .and(body_partial_json(serde_json::json!({ "orderId": "ord-1" })))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let ack = client.cancel_order("ord-1").await.unwrap();
    assert!(ack.success);
    assert_eq!(ack.order_id.as_deref(), Some("ord-1"));
}

#[tokio::test]
async fn test_get_coin_icon_returns_raw_bytes() {
    let server = MockServer::start().await;
    let svg = b"<svg xmlns=\"http://www.w3.org/2000/svg\"/>";

    Mock::given(method("GET"))
        .and(path("/coins/icon/btc"))
        .and(header("Accept", "image/svg"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(svg.to_vec(), "image/svg+xml"))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let bytes = client.get_coin_icon("btc").await.unwrap();
    assert_eq!(bytes, svg);
}

#[tokio::test]
async fn test_api_error_carries_status_and_cause() {
    let server = MockServer::start().await;
    let response = serde_json::json!({ "error": { "message": "Amount too low" } });

    Mock::given(method("GET"))
        .and(path("/permissions"))
        .respond_with(ResponseTemplate::new(400).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let error = client.get_permissions().await.unwrap_err();
    match error {
        SideShiftError::Api(failure) => {
            assert_eq!(failure.status, Some(400));
            assert_eq!(
                failure.cause,
                Some(serde_json::json!({ "message": "Amount too low" }))
            );
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_success_body_is_shape_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/permissions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let error = client.get_permissions().await.unwrap_err();
    assert!(matches!(error, SideShiftError::Shape(_)));
}

#[tokio::test]
async fn test_blank_parameter_fails_before_any_request() {
    let server = MockServer::start().await;
    let client = build_client(&server);

    let error = client.get_shift("   ").await.unwrap_err();
    assert!(matches!(error, SideShiftError::InvalidInput(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}
