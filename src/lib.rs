//! Tradewind: rules-based intraday trading engine.
//!
//! Fetches historical candles over REST with bounded retries, derives RSI and
//! short/long moving averages, and turns indicator state into trade decisions
//! gated by a daily trade cap and a trading-session window. The backtest
//! module replays the same rule set over a historical range and reports
//! paired-trade profit.

pub mod backtest;
pub mod config;
pub mod core;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod signals;

pub use backtest::{backtest, BacktestSummary};
pub use signals::decide;
