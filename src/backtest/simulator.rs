//! Backtest simulator: the live rule precedence without the session gates.

use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, warn};

use crate::config::StrategyParams;
use crate::indicators::snapshot_series;
use crate::models::{BacktestTrade, Candle};
use crate::signals::rules;

pub struct BacktestSimulator {
    params: StrategyParams,
}

impl BacktestSimulator {
    pub fn new(params: StrategyParams) -> Self {
        Self { params }
    }

    /// Replays rules 1-4 over the bars inside `[start, end]`.
    ///
    /// The trading-window and trade-cap gates of the live path are not
    /// applied here, so a run can emit trades the live engine would hold
    /// back; every run warns about this once. Adjacent same-side signals
    /// are kept as-is.
    ///
    /// `abort` is polled each bar so very large ranges can be cut short;
    /// trades produced so far are returned.
    pub fn run(
        &self,
        candles: &[Candle],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        abort: Option<&AtomicBool>,
    ) -> Vec<BacktestTrade> {
        warn!("backtest applies no trading-window or trade-cap gating; results can include trades the live engine would hold back");

        let filtered: Vec<Candle> = candles
            .iter()
            .filter(|c| c.timestamp >= start && c.timestamp <= end)
            .cloned()
            .collect();

        if filtered.is_empty() {
            info!(%start, %end, "no bars in backtest range");
            return Vec::new();
        }

        let snapshots = snapshot_series(&filtered, &self.params);
        let mut trades = Vec::new();

        for i in 1..filtered.len() {
            if let Some(flag) = abort {
                if flag.load(Ordering::Relaxed) {
                    warn!(bars_done = i, trades = trades.len(), "backtest aborted");
                    break;
                }
            }

            if let Some((side, _reason)) =
                rules::evaluate(&snapshots[i - 1], &snapshots[i], &self.params)
            {
                trades.push(BacktestTrade {
                    side,
                    timestamp: filtered[i].timestamp,
                    price: filtered[i].close,
                });
            }
        }

        info!(
            bars = filtered.len(),
            trades = trades.len(),
            "backtest run complete"
        );
        trades
    }
}
