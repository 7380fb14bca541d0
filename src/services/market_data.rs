//! Market data provider interface.

use crate::error::FetchError;
use crate::models::Candle;

/// Source of ordered historical candles for a symbol/interval.
///
/// Implementations own their retry policy; callers treat an error as "no
/// data this cycle", never as fatal. Each call is independent: no caching,
/// no deduplication of outstanding requests.
#[async_trait::async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Fetch the candle series for a symbol at the given interval, sorted by
    /// strictly increasing timestamp.
    async fn fetch_candles(&self, symbol: &str, interval: &str)
        -> Result<Vec<Candle>, FetchError>;
}
