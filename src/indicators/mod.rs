//! Indicator math over candle series.
//!
//! Every function returns a sequence index-aligned with its input; warm-up
//! entries are `None` rather than a sentinel value.

pub mod momentum;
pub mod trend;

use crate::config::StrategyParams;
use crate::models::{Candle, IndicatorSnapshot};

pub use momentum::rsi::rsi_series;
pub use trend::sma::sma_series;

/// Computes the full indicator snapshot sequence for a candle series.
///
/// Output length always equals input length; entries stay undefined until
/// both the RSI lookback and the long moving-average window are filled.
pub fn snapshot_series(candles: &[Candle], params: &StrategyParams) -> Vec<IndicatorSnapshot> {
    let rsi = rsi_series(candles, params.rsi_period);
    let short = sma_series(candles, params.short_ma_period);
    let long = sma_series(candles, params.long_ma_period);

    candles
        .iter()
        .enumerate()
        .map(|(i, candle)| IndicatorSnapshot {
            timestamp: candle.timestamp,
            rsi: rsi[i],
            short_ma: short[i],
            long_ma: long[i],
        })
        .collect()
}
