//! REST historical data client with bounded retry and exponential backoff.
//!
//! Every attempt carries a bearer credential and a per-attempt timeout. The
//! four transport failure classes all trigger a retry and are logged under
//! their own labels; a malformed body fails immediately. The whole fetch is
//! an ordinary future, so dropping it (e.g. losing a shutdown select) also
//! abandons any pending backoff sleep.

use backon::{ExponentialBuilder, Retryable};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::error::FetchError;
use crate::models::Candle;
use crate::services::market_data::MarketDataProvider;

pub struct RestMarketData {
    base_url: String,
    access_token: String,
    client: reqwest::Client,
    timeout: Duration,
    max_retries: u32,
    backoff: Duration,
}

/// Success body: the bar list lives under `data` on the historical endpoint
/// and `prices` on the older one.
#[derive(Debug, Deserialize)]
struct HistoryResponse {
    #[serde(alias = "prices")]
    data: Vec<RawBar>,
}

/// A single wire bar. `datetime` and `close` are required; the rest default
/// to zero when the upstream omits them.
#[derive(Debug, Deserialize)]
struct RawBar {
    datetime: DateTime<Utc>,
    close: f64,
    #[serde(default)]
    open: f64,
    #[serde(default)]
    high: f64,
    #[serde(default)]
    low: f64,
    #[serde(default)]
    volume: f64,
}

impl RestMarketData {
    pub fn from_config(api: &ApiConfig) -> Self {
        Self::with_client(
            api.base_url.clone(),
            api.access_token.clone(),
            reqwest::Client::new(),
        )
        .with_retry(api.max_retries, api.backoff)
        .with_timeout(api.timeout)
    }

    /// Construct against an explicit base URL and client; the seam the
    /// integration tests point at a mock server.
    pub fn with_client(base_url: String, access_token: String, client: reqwest::Client) -> Self {
        Self {
            base_url,
            access_token,
            client,
            timeout: Duration::from_secs(10),
            max_retries: 3,
            backoff: Duration::from_secs(1),
        }
    }

    pub fn with_retry(mut self, max_retries: u32, backoff: Duration) -> Self {
        self.max_retries = max_retries;
        self.backoff = backoff;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn fetch_once(&self, symbol: &str, interval: &str) -> Result<Vec<Candle>, FetchError> {
        let url = format!("{}/data/{}/{}", self.base_url, symbol, interval);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::UpstreamStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| self.classify(e))?;
        let parsed: HistoryResponse =
            serde_json::from_str(&body).map_err(|e| FetchError::MalformedPayload {
                reason: e.to_string(),
            })?;

        let mut candles: Vec<Candle> = parsed
            .data
            .into_iter()
            .map(|bar| Candle::new(bar.open, bar.high, bar.low, bar.close, bar.volume, bar.datetime))
            .collect();
        candles.sort_by_key(|c| c.timestamp);

        if candles.windows(2).any(|w| w[0].timestamp == w[1].timestamp) {
            return Err(FetchError::MalformedPayload {
                reason: "duplicate bar timestamps".to_string(),
            });
        }

        debug!(symbol, interval, bars = candles.len(), "fetched candle series");
        Ok(candles)
    }

    fn classify(&self, e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout {
                timeout_ms: self.timeout.as_millis() as u64,
            }
        } else if e.is_connect() {
            FetchError::ConnectionFailed {
                reason: e.to_string(),
            }
        } else {
            FetchError::Transport {
                reason: e.to_string(),
            }
        }
    }
}

#[async_trait::async_trait]
impl MarketDataProvider for RestMarketData {
    /// Fetch with up to `max_retries` total attempts. The delay before retry
    /// n is `backoff * 2^(n-1)`; there is no wait after the final attempt.
    async fn fetch_candles(
        &self,
        symbol: &str,
        interval: &str,
    ) -> Result<Vec<Candle>, FetchError> {
        let policy = ExponentialBuilder::default()
            .with_min_delay(self.backoff)
            .with_factor(2.0)
            .with_max_times(self.max_retries.saturating_sub(1) as usize);

        (|| self.fetch_once(symbol, interval))
            .retry(policy)
            .when(|e: &FetchError| e.is_retryable())
            .notify(|err: &FetchError, delay: Duration| {
                warn!(
                    symbol,
                    class = err.label(),
                    error = %err,
                    delay_ms = delay.as_millis() as u64,
                    "fetch attempt failed, backing off"
                );
            })
            .await
    }
}
