use std::sync::atomic::{AtomicU32, Ordering};
use tokio::sync::{Mutex, MutexGuard};

/// Per-day trade accounting for the live flow.
///
/// The counter is atomic so concurrent flows in the same process observe a
/// consistent count, and `record_fill` refuses to push it past the cap. The
/// submission lock serializes order submissions: at most one outstanding
/// gateway call per session.
pub struct TradeSession {
    trades_today: AtomicU32,
    cap: u32,
    submission: Mutex<()>,
}

impl TradeSession {
    pub fn new(cap: u32) -> Self {
        Self {
            trades_today: AtomicU32::new(0),
            cap,
            submission: Mutex::new(()),
        }
    }

    pub fn cap(&self) -> u32 {
        self.cap
    }

    pub fn trades_today(&self) -> u32 {
        self.trades_today.load(Ordering::SeqCst)
    }

    pub fn is_exhausted(&self) -> bool {
        self.trades_today() >= self.cap
    }

    /// Counts a filled order. Returns false (without incrementing) if the cap
    /// is already reached, so `trades_today <= cap` holds at every
    /// observation point.
    pub fn record_fill(&self) -> bool {
        self.trades_today
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                (n < self.cap).then_some(n + 1)
            })
            .is_ok()
    }

    /// Acquired for the duration of one order submission.
    pub async fn submission_lock(&self) -> MutexGuard<'_, ()> {
        self.submission.lock().await
    }
}
