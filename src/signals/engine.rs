//! Live decision engine: session gates in front of the shared rule set.

use chrono::NaiveTime;
use tracing::debug;

use crate::config::{Config, SessionParams, StrategyParams};
use crate::indicators::snapshot_series;
use crate::models::{Candle, Decision, HoldReason, TradeIntent, TradeSession};
use crate::signals::rules;

pub struct DecisionEngine {
    strategy: StrategyParams,
    session_params: SessionParams,
}

impl DecisionEngine {
    pub fn new(strategy: StrategyParams, session_params: SessionParams) -> Self {
        Self {
            strategy,
            session_params,
        }
    }

    /// Session gates that hold regardless of market data. Checked before a
    /// fetch is even attempted, and again inside `decide`.
    pub fn pre_gate(&self, session: &TradeSession, now: NaiveTime) -> Option<HoldReason> {
        if session.is_exhausted() {
            return Some(HoldReason::CapReached);
        }
        if !self.session_params.window.contains(now) {
            return Some(HoldReason::MarketClosed);
        }
        None
    }

    /// Evaluates the latest/previous indicator pair for a candle series.
    ///
    /// Gates are applied in order, each short-circuiting to a hold: trade
    /// cap, trading window, then indicator completeness. A produced intent
    /// carries the latest close and timestamp.
    pub fn decide(&self, candles: &[Candle], session: &TradeSession, now: NaiveTime) -> Decision {
        if let Some(reason) = self.pre_gate(session, now) {
            return Decision::Hold(reason);
        }

        if candles.is_empty() {
            return Decision::Hold(HoldReason::NoData);
        }
        if candles.len() < 2 {
            return Decision::Hold(HoldReason::InsufficientData);
        }

        let snapshots = snapshot_series(candles, &self.strategy);
        let curr = &snapshots[snapshots.len() - 1];
        let prev = &snapshots[snapshots.len() - 2];

        if !prev.is_complete() || !curr.is_complete() {
            debug!(
                bars = candles.len(),
                warmup = self.strategy.warmup_bars(),
                "indicators still warming up"
            );
            return Decision::Hold(HoldReason::IndicatorWarmup);
        }

        match rules::evaluate(prev, curr, &self.strategy) {
            Some((side, reason)) => {
                let latest = &candles[candles.len() - 1];
                Decision::Trade(TradeIntent {
                    side,
                    symbol: self.strategy.symbol.clone(),
                    quantity: self.strategy.quantity,
                    timestamp: latest.timestamp,
                    price: latest.close,
                    reason,
                })
            }
            None => Decision::Hold(HoldReason::NoSignal),
        }
    }
}

/// Convenience surface for callers holding a full `Config`.
pub fn decide(
    candles: &[Candle],
    session: &TradeSession,
    now: NaiveTime,
    config: &Config,
) -> Decision {
    DecisionEngine::new(config.strategy.clone(), config.session.clone())
        .decide(candles, session, now)
}
