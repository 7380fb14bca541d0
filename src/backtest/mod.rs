//! Offline replay of the decision rules with paired-trade profit accounting.

pub mod report;
pub mod simulator;

use chrono::{DateTime, Utc};

use crate::config::Config;
use crate::models::{BacktestTrade, Candle};

pub use report::{report, BacktestReport, PairedResult};
pub use simulator::BacktestSimulator;

/// Everything a backtest run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct BacktestSummary {
    pub trades: Vec<BacktestTrade>,
    pub report: BacktestReport,
}

/// Replays the rule set over `[start, end]` and scores the resulting trades.
pub fn backtest(
    candles: &[Candle],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    config: &Config,
) -> BacktestSummary {
    let trades = BacktestSimulator::new(config.strategy.clone()).run(candles, start, end, None);
    let report = report::report(&trades);
    BacktestSummary { trades, report }
}
