//! Historical data fetch: parsing, credentials, and the retry schedule

use std::time::{Duration, Instant};

use serde_json::json;
use tradewind::error::FetchError;
use tradewind::services::market_data::MarketDataProvider;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::test_utils::{
    bars, history_body, history_path, mount_history, provider, INTERVAL, SYMBOL, TOKEN,
};

#[tokio::test]
async fn parses_bars_under_the_data_key() {
    let server = MockServer::start().await;
    mount_history(&server, history_body(&[100.0, 101.0, 102.0])).await;

    let candles = provider(&server)
        .fetch_candles(SYMBOL, INTERVAL)
        .await
        .expect("fetch succeeds");

    assert_eq!(candles.len(), 3);
    assert_eq!(candles[0].close, 100.0);
    assert_eq!(candles[2].close, 102.0);
    assert!(candles.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
}

#[tokio::test]
async fn accepts_the_prices_alias_and_partial_records() {
    let server = MockServer::start().await;
    // Records carrying only the required fields; the rest default to zero.
    let body = json!({
        "prices": [
            { "datetime": "2024-01-02T09:16:00Z", "close": 101.0 },
            { "datetime": "2024-01-02T09:15:00Z", "close": 100.0 }
        ]
    });
    mount_history(&server, body).await;

    let candles = provider(&server)
        .fetch_candles(SYMBOL, INTERVAL)
        .await
        .expect("fetch succeeds");

    // Out-of-order records are sorted at the boundary.
    assert_eq!(candles.len(), 2);
    assert_eq!(candles[0].close, 100.0);
    assert_eq!(candles[1].close, 101.0);
    assert_eq!(candles[0].volume, 0.0);
}

#[tokio::test]
async fn sends_the_bearer_credential() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(history_path()))
        .and(header("authorization", format!("Bearer {TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(history_body(&[100.0, 101.0])))
        .expect(1)
        .mount(&server)
        .await;

    provider(&server)
        .fetch_candles(SYMBOL, INTERVAL)
        .await
        .expect("fetch succeeds");
}

#[tokio::test]
async fn persistent_upstream_errors_exhaust_three_attempts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(history_path()))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&server)
        .await;

    let start = Instant::now();
    let err = provider(&server)
        .fetch_candles(SYMBOL, INTERVAL)
        .await
        .expect_err("fetch exhausts retries");
    let elapsed = start.elapsed();

    assert!(matches!(err, FetchError::UpstreamStatus { status: 500 }));
    // Two backoff waits: 10ms then 20ms, and none after the final attempt.
    assert!(elapsed >= Duration::from_millis(30), "elapsed {elapsed:?}");
}

#[tokio::test]
async fn recovers_when_a_retry_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(history_path()))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    mount_history(&server, history_body(&[100.0, 101.0])).await;

    let candles = provider(&server)
        .fetch_candles(SYMBOL, INTERVAL)
        .await
        .expect("third attempt succeeds");
    assert_eq!(candles.len(), 2);
}

#[tokio::test]
async fn malformed_payload_is_not_retried() {
    let server = MockServer::start().await;
    // A record missing its close is rejected at the boundary.
    let body = json!({ "data": [ { "datetime": "2024-01-02T09:15:00Z", "open": 100.0 } ] });
    Mock::given(method("GET"))
        .and(path(history_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;

    let err = provider(&server)
        .fetch_candles(SYMBOL, INTERVAL)
        .await
        .expect_err("malformed body fails fast");
    assert!(matches!(err, FetchError::MalformedPayload { .. }));
}

#[tokio::test]
async fn duplicate_timestamps_are_malformed() {
    let server = MockServer::start().await;
    let mut records = bars(&[100.0]);
    records.push(records[0].clone());
    mount_history(&server, json!({ "data": records })).await;

    let err = provider(&server)
        .fetch_candles(SYMBOL, INTERVAL)
        .await
        .expect_err("duplicate bars rejected");
    assert!(matches!(err, FetchError::MalformedPayload { .. }));
}

#[tokio::test]
async fn slow_responses_surface_as_timeouts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(history_path()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(history_body(&[100.0, 101.0]))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let slow = provider(&server)
        .with_retry(1, Duration::from_millis(1))
        .with_timeout(Duration::from_millis(50));

    let err = slow
        .fetch_candles(SYMBOL, INTERVAL)
        .await
        .expect_err("timeout surfaces");
    assert!(matches!(err, FetchError::Timeout { .. }));
}
