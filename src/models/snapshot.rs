use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Indicator state for one bar, index-aligned with the candle sequence.
///
/// `None` marks warm-up entries where the indicator has insufficient history
/// (or, for RSI, a flat price making the value undefined). Never mutated in
/// place: the whole series is recomputed when the candles change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub timestamp: DateTime<Utc>,
    pub rsi: Option<f64>,
    pub short_ma: Option<f64>,
    pub long_ma: Option<f64>,
}

impl IndicatorSnapshot {
    /// True when every field the rule set reads is defined.
    pub fn is_complete(&self) -> bool {
        self.rsi.is_some() && self.short_ma.is_some() && self.long_ma.is_some()
    }
}
