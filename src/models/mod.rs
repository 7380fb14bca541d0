//! Shared data models spanning the engine layers.

pub mod candle;
pub mod session;
pub mod snapshot;
pub mod trade;

pub use candle::Candle;
pub use session::TradeSession;
pub use snapshot::IndicatorSnapshot;
pub use trade::{BacktestTrade, Decision, HoldReason, Side, TradeIntent, TradeReason};
