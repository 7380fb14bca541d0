//! Environment-based configuration.
//!
//! Everything is read from environment variables (a `.env` file is loaded by
//! the binaries via dotenvy) with defaults matching the reference strategy:
//! RSI 14 with 70/30 thresholds, 9/21 moving averages, at most 5 trades per
//! day inside the 09:15-15:30 session window.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Returns the current runtime environment (used to pick the log format).
pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {key}")]
    Missing { key: &'static str },

    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// REST endpoint settings shared by the data and order clients.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub access_token: String,
    /// Per-attempt request timeout.
    pub timeout: Duration,
    /// Total fetch attempts before giving up (not retries after the first).
    pub max_retries: u32,
    /// Base delay of the exponential backoff schedule.
    pub backoff: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.dhan.co".to_string(),
            access_token: String::new(),
            timeout: Duration::from_secs(10),
            max_retries: 3,
            backoff: Duration::from_secs(1),
        }
    }
}

/// Indicator and sizing parameters for the rule set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyParams {
    pub symbol: String,
    pub quantity: u32,
    pub rsi_period: usize,
    pub overbought: f64,
    pub oversold: f64,
    pub short_ma_period: usize,
    pub long_ma_period: usize,
}

impl Default for StrategyParams {
    fn default() -> Self {
        Self {
            symbol: "RELIANCE".to_string(),
            quantity: 1,
            rsi_period: 14,
            overbought: 70.0,
            oversold: 30.0,
            short_ma_period: 9,
            long_ma_period: 21,
        }
    }
}

impl StrategyParams {
    /// Bars with no fully-defined indicator snapshot at the start of a series.
    pub fn warmup_bars(&self) -> usize {
        self.rsi_period.max(self.long_ma_period.saturating_sub(1))
    }
}

/// Time-of-day interval inside which live decisions may act.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradingWindow {
    pub open: NaiveTime,
    pub close: NaiveTime,
}

impl TradingWindow {
    pub fn contains(&self, now: NaiveTime) -> bool {
        self.open <= now && now <= self.close
    }
}

impl Default for TradingWindow {
    fn default() -> Self {
        Self {
            open: NaiveTime::from_hms_opt(9, 15, 0).expect("valid market open"),
            close: NaiveTime::from_hms_opt(15, 30, 0).expect("valid market close"),
        }
    }
}

/// Per-day session limits for the live flow.
#[derive(Debug, Clone)]
pub struct SessionParams {
    pub max_trades_per_day: u32,
    pub window: TradingWindow,
}

impl Default for SessionParams {
    fn default() -> Self {
        Self {
            max_trades_per_day: 5,
            window: TradingWindow::default(),
        }
    }
}

/// Top-level configuration for both the live engine and the backtester.
#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub strategy: StrategyParams,
    pub session: SessionParams,
    pub interval: String,
    pub poll_interval_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            strategy: StrategyParams::default(),
            session: SessionParams::default(),
            interval: "5m".to_string(),
            poll_interval_seconds: 60,
        }
    }
}

impl Config {
    /// Loads configuration from the environment, falling back to defaults
    /// for everything except the API access token.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api = ApiConfig {
            base_url: env::var("API_BASE_URL")
                .unwrap_or_else(|_| ApiConfig::default().base_url),
            access_token: env::var("API_ACCESS_TOKEN")
                .map_err(|_| ConfigError::Missing { key: "API_ACCESS_TOKEN" })?,
            timeout: Duration::from_secs(parse_var("API_TIMEOUT_SECONDS", 10)?),
            max_retries: parse_var("FETCH_MAX_RETRIES", 3)?,
            backoff: Duration::from_secs(parse_var("FETCH_BACKOFF_SECONDS", 1)?),
        };

        let defaults = StrategyParams::default();
        let strategy = StrategyParams {
            symbol: env::var("SYMBOL").unwrap_or(defaults.symbol),
            quantity: parse_var("QUANTITY", defaults.quantity)?,
            rsi_period: parse_var("RSI_PERIOD", defaults.rsi_period)?,
            overbought: parse_var("RSI_OVERBOUGHT", defaults.overbought)?,
            oversold: parse_var("RSI_OVERSOLD", defaults.oversold)?,
            short_ma_period: parse_var("SHORT_MA_PERIOD", defaults.short_ma_period)?,
            long_ma_period: parse_var("LONG_MA_PERIOD", defaults.long_ma_period)?,
        };

        let session = SessionParams {
            max_trades_per_day: parse_var("MAX_TRADES_PER_DAY", 5)?,
            window: TradingWindow {
                open: parse_time("MARKET_OPEN", TradingWindow::default().open)?,
                close: parse_time("MARKET_CLOSE", TradingWindow::default().close)?,
            },
        };

        Ok(Self {
            api,
            strategy,
            session,
            interval: env::var("TIMEFRAME").unwrap_or_else(|_| "5m".to_string()),
            poll_interval_seconds: parse_var("POLL_INTERVAL_SECONDS", 60)?,
        })
    }
}

fn parse_var<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

fn parse_time(key: &'static str, default: NaiveTime) -> Result<NaiveTime, ConfigError> {
    match env::var(key) {
        Ok(raw) => NaiveTime::parse_from_str(&raw, "%H:%M").map_err(|e| ConfigError::Invalid {
            key,
            reason: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}
