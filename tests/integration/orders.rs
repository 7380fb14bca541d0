//! Order gateway: wire shape, acknowledgements, and rejections

use chrono::{TimeZone, Utc};
use serde_json::json;
use tradewind::error::OrderError;
use tradewind::models::{Side, TradeIntent, TradeReason};
use tradewind::services::{OrderGateway, RestOrderGateway};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::test_utils::TOKEN;

fn intent(side: Side) -> TradeIntent {
    TradeIntent {
        side,
        symbol: "RELIANCE".to_string(),
        quantity: 2,
        timestamp: Utc.with_ymd_and_hms(2024, 1, 2, 10, 0, 0).unwrap(),
        price: 101.5,
        reason: TradeReason::RsiOversold,
    }
}

fn gateway(server: &MockServer) -> RestOrderGateway {
    RestOrderGateway::with_client(server.uri(), TOKEN.to_string(), reqwest::Client::new())
}

#[tokio::test]
async fn submits_an_intraday_order_and_returns_the_ack() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/orders"))
        .and(header("authorization", format!("Bearer {TOKEN}").as_str()))
        .and(body_partial_json(json!({
            "symbol": "RELIANCE",
            "quantity": 2,
            "orderType": "BUY",
            "productType": "MIS",
            "validity": "DAY",
            "variety": "REGULAR"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "orderId": "OID-42" })))
        .expect(1)
        .mount(&server)
        .await;

    let ack = gateway(&server)
        .place_order(&intent(Side::Buy))
        .await
        .expect("order acknowledged");
    assert_eq!(ack.0["orderId"], "OID-42");
}

#[tokio::test]
async fn sell_intents_carry_the_sell_order_type() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/orders"))
        .and(body_partial_json(json!({ "orderType": "SELL" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    gateway(&server)
        .place_order(&intent(Side::Sell))
        .await
        .expect("order acknowledged");
}

#[tokio::test]
async fn rejections_surface_once_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/orders"))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&server)
        .await;

    let err = gateway(&server)
        .place_order(&intent(Side::Buy))
        .await
        .expect_err("rejection surfaces");
    assert!(matches!(err, OrderError::Rejected { status: 502 }));
}
