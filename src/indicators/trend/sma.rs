//! Simple moving average over closing prices.

use crate::models::Candle;

/// Calculate the trailing SMA series for a candle sequence.
///
/// Entry `i` averages the `window` closes ending at bar `i`; the first
/// defined entry is at index `window - 1`.
pub fn sma_series(candles: &[Candle], window: usize) -> Vec<Option<f64>> {
    let n = candles.len();
    let mut out = vec![None; n];
    if window == 0 || n < window {
        return out;
    }

    let mut sum: f64 = candles[..window].iter().map(|c| c.close).sum();
    out[window - 1] = Some(sum / window as f64);

    for i in window..n {
        sum += candles[i].close - candles[i - window].close;
        out[i] = Some(sum / window as f64);
    }

    out
}
