use std::time::Duration;

use serde_json::{json, Value};
use tradewind::services::RestMarketData;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN: &str = "test-token";
pub const SYMBOL: &str = "RELIANCE";
pub const INTERVAL: &str = "5m";

/// Provider pointed at a mock server, with a millisecond-scale backoff so
/// retry tests stay fast.
pub fn provider(server: &MockServer) -> RestMarketData {
    RestMarketData::with_client(server.uri(), TOKEN.to_string(), reqwest::Client::new())
        .with_retry(3, Duration::from_millis(10))
        .with_timeout(Duration::from_secs(5))
}

pub fn history_path() -> String {
    format!("/data/{SYMBOL}/{INTERVAL}")
}

/// Full-fidelity bar records with strictly increasing timestamps.
pub fn bars(closes: &[f64]) -> Vec<Value> {
    closes
        .iter()
        .enumerate()
        .map(|(i, close)| {
            json!({
                "datetime": format!("2024-01-02T09:{:02}:00Z", 15 + i),
                "open": close,
                "high": close + 0.5,
                "low": close - 0.5,
                "close": close,
                "volume": 1000.0
            })
        })
        .collect()
}

pub fn history_body(closes: &[f64]) -> Value {
    json!({ "data": bars(closes) })
}

/// Thirty falling closes: enough history for every indicator, and deeply
/// oversold so a decision cycle produces a buy.
pub fn oversold_closes() -> Vec<f64> {
    (0..30).map(|i| 200.0 - i as f64).collect()
}

pub async fn mount_history(server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path(history_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}
