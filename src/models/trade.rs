use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Wire value used in the order submission body.
    pub fn as_order_type(&self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        }
    }
}

/// Which rule produced a trade intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeReason {
    RsiOverbought,
    RsiOversold,
    MaBullishCross,
    MaBearishCross,
}

/// A concrete instruction for the order gateway. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeIntent {
    pub side: Side,
    pub symbol: String,
    pub quantity: u32,
    pub timestamp: DateTime<Utc>,
    pub price: f64,
    pub reason: TradeReason,
}

/// Why a decision cycle produced no trade. No-action is always representable
/// and never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldReason {
    /// Daily trade cap already reached.
    CapReached,
    /// Current time outside the trading window.
    MarketClosed,
    /// The data source returned nothing this cycle.
    NoData,
    /// Fewer than two bars available.
    InsufficientData,
    /// An indicator required by the rules is still warming up.
    IndicatorWarmup,
    /// Indicators defined but no rule matched.
    NoSignal,
}

/// Outcome of one live decision cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    Trade(TradeIntent),
    Hold(HoldReason),
}

impl Decision {
    /// Stable label for logs and the decisions counter.
    pub fn label(&self) -> &'static str {
        match self {
            Decision::Trade(intent) => match intent.side {
                Side::Buy => "buy",
                Side::Sell => "sell",
            },
            Decision::Hold(reason) => match reason {
                HoldReason::CapReached => "cap_reached",
                HoldReason::MarketClosed => "market_closed",
                HoldReason::NoData => "no_data",
                HoldReason::InsufficientData => "insufficient_data",
                HoldReason::IndicatorWarmup => "indicator_warmup",
                HoldReason::NoSignal => "no_signal",
            },
        }
    }
}

/// The subset of a trade intent the profit report needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestTrade {
    pub side: Side,
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}
