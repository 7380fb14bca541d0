//! Paired-trade profit accounting over a simulated trade sequence.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::{BacktestTrade, Side};

/// One scored round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairedResult {
    pub buy_price: f64,
    pub sell_price: f64,
    pub profit: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BacktestReport {
    pub pairs: Vec<PairedResult>,
    pub total_profit: f64,
}

/// Scores trades as non-overlapping consecutive pairs: (0,1), (2,3), ...
///
/// BUY then SELL and SELL then BUY both score as sell price minus buy
/// price. A same-side pair contributes nothing and is dropped rather than
/// carried forward, and a trailing unpaired trade is unscored.
pub fn report(trades: &[BacktestTrade]) -> BacktestReport {
    let mut pairs = Vec::new();
    let mut total_profit = 0.0;

    for i in (1..trades.len()).step_by(2) {
        let first = &trades[i - 1];
        let second = &trades[i];

        let pair = match (first.side, second.side) {
            (Side::Buy, Side::Sell) => PairedResult {
                buy_price: first.price,
                sell_price: second.price,
                profit: second.price - first.price,
            },
            (Side::Sell, Side::Buy) => PairedResult {
                buy_price: second.price,
                sell_price: first.price,
                profit: first.price - second.price,
            },
            _ => continue,
        };

        info!(
            pair = pairs.len() + 1,
            buy = pair.buy_price,
            sell = pair.sell_price,
            profit = pair.profit,
            "scored backtest pair"
        );
        total_profit += pair.profit;
        pairs.push(pair);
    }

    info!(
        pairs = pairs.len(),
        total_profit, "backtest report complete"
    );
    BacktestReport {
        pairs,
        total_profit,
    }
}
