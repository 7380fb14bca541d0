//! Unit tests for trade session accounting

use std::sync::Arc;
use std::thread;
use tradewind::models::TradeSession;

#[test]
fn counts_fills_up_to_the_cap() {
    let session = TradeSession::new(5);
    assert_eq!(session.trades_today(), 0);
    assert!(!session.is_exhausted());

    for expected in 1..=5 {
        assert!(session.record_fill());
        assert_eq!(session.trades_today(), expected);
    }

    assert!(session.is_exhausted());
    assert!(!session.record_fill());
    assert_eq!(session.trades_today(), 5);
}

#[test]
fn zero_cap_is_exhausted_from_the_start() {
    let session = TradeSession::new(0);
    assert!(session.is_exhausted());
    assert!(!session.record_fill());
    assert_eq!(session.trades_today(), 0);
}

#[test]
fn concurrent_fills_never_exceed_the_cap() {
    let session = Arc::new(TradeSession::new(5));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let session = session.clone();
            thread::spawn(move || {
                let mut recorded = 0u32;
                for _ in 0..3 {
                    if session.record_fill() {
                        recorded += 1;
                    }
                }
                recorded
            })
        })
        .collect();

    let recorded: u32 = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(recorded, 5);
    assert_eq!(session.trades_today(), 5);
}

#[tokio::test]
async fn submission_lock_serializes_orders() {
    let session = Arc::new(TradeSession::new(5));

    let guard = session.submission_lock().await;
    let contender = {
        let session = session.clone();
        tokio::spawn(async move {
            let _guard = session.submission_lock().await;
        })
    };

    // The contender cannot finish while the first submission holds the lock.
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    assert!(!contender.is_finished());

    drop(guard);
    contender.await.unwrap();
}
