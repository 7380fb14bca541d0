//! RSI (Relative Strength Index) indicator
//!
//! RSI = 100 - (100 / (1 + RS))
//! RS = Average Gain / Average Loss
//!
//! Averages are a simple rolling mean over `period` close-to-close changes,
//! not Wilder smoothing. When the average loss is zero but gains exist the
//! value saturates at 100 instead of dividing by zero; a completely flat
//! window leaves the entry undefined.

use crate::models::Candle;

/// Calculate the RSI series for a candle sequence.
///
/// Entry `i` covers the `period` changes ending at bar `i`, so the first
/// defined entry is at index `period`.
pub fn rsi_series(candles: &[Candle], period: usize) -> Vec<Option<f64>> {
    let n = candles.len();
    let mut out = vec![None; n];
    if period == 0 || n < period + 1 {
        return out;
    }

    let mut gains = Vec::with_capacity(n - 1);
    let mut losses = Vec::with_capacity(n - 1);
    for i in 1..n {
        let change = candles[i].close - candles[i - 1].close;
        gains.push(change.max(0.0));
        losses.push((-change).max(0.0));
    }

    let mut gain_sum: f64 = gains[..period].iter().sum();
    let mut loss_sum: f64 = losses[..period].iter().sum();

    for bar in period..n {
        if bar > period {
            // Change at index bar-1 enters the window; bar-1-period leaves.
            gain_sum += gains[bar - 1] - gains[bar - 1 - period];
            loss_sum += losses[bar - 1] - losses[bar - 1 - period];
        }

        let avg_gain = gain_sum / period as f64;
        let avg_loss = loss_sum / period as f64;

        out[bar] = if avg_loss == 0.0 {
            if avg_gain > 0.0 {
                Some(100.0)
            } else {
                None
            }
        } else {
            let rs = avg_gain / avg_loss;
            Some(100.0 - 100.0 / (1.0 + rs))
        };
    }

    out
}
