//! Rule precedence shared by the live engine and the backtest simulator.

use crate::config::StrategyParams;
use crate::models::{IndicatorSnapshot, Side, TradeReason};

/// Applies the rule set to a consecutive snapshot pair. First match wins;
/// momentum extremes deliberately dominate the crossover rules.
///
/// A rule whose inputs are still undefined simply does not match, so early
/// bars where RSI is defined but the long MA is not can still trigger the
/// RSI rules. The live engine additionally rejects incomplete snapshots
/// before calling this.
pub fn evaluate(
    prev: &IndicatorSnapshot,
    curr: &IndicatorSnapshot,
    params: &StrategyParams,
) -> Option<(Side, TradeReason)> {
    if let Some(rsi) = curr.rsi {
        if rsi > params.overbought {
            return Some((Side::Sell, TradeReason::RsiOverbought));
        }
        if rsi < params.oversold {
            return Some((Side::Buy, TradeReason::RsiOversold));
        }
    }

    let (prev_short, prev_long, curr_short, curr_long) = match (
        prev.short_ma,
        prev.long_ma,
        curr.short_ma,
        curr.long_ma,
    ) {
        (Some(a), Some(b), Some(c), Some(d)) => (a, b, c, d),
        _ => return None,
    };

    if prev_short <= prev_long && curr_short > curr_long {
        return Some((Side::Buy, TradeReason::MaBullishCross));
    }
    if prev_short >= prev_long && curr_short < curr_long {
        return Some((Side::Sell, TradeReason::MaBearishCross));
    }

    None
}
