//! The live trading loop: fetch, decide, submit, one cycle at a time.

use chrono::{Local, NaiveTime};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::metrics::Metrics;
use crate::models::{Decision, HoldReason, TradeSession};
use crate::services::market_data::MarketDataProvider;
use crate::services::orders::OrderGateway;
use crate::signals::DecisionEngine;

/// Owns one symbol's live flow. A single decision per cycle; the session's
/// submission lock guarantees at most one outstanding order.
pub struct LiveEngine {
    provider: Arc<dyn MarketDataProvider>,
    gateway: Arc<dyn OrderGateway>,
    engine: DecisionEngine,
    session: Arc<TradeSession>,
    metrics: Option<Arc<Metrics>>,
    symbol: String,
    interval: String,
    poll_interval: std::time::Duration,
}

impl LiveEngine {
    pub fn new(
        config: &Config,
        provider: Arc<dyn MarketDataProvider>,
        gateway: Arc<dyn OrderGateway>,
        session: Arc<TradeSession>,
    ) -> Self {
        Self {
            provider,
            gateway,
            engine: DecisionEngine::new(config.strategy.clone(), config.session.clone()),
            session,
            metrics: None,
            symbol: config.strategy.symbol.clone(),
            interval: config.interval.clone(),
            poll_interval: std::time::Duration::from_secs(config.poll_interval_seconds),
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Runs one decision cycle against the wall clock.
    pub async fn run_once(&self) -> Decision {
        self.run_once_at(Local::now().time()).await
    }

    /// Runs one decision cycle at an explicit time of day.
    ///
    /// Fetch failure after retries is "no data this cycle", never fatal. The
    /// trade counter only advances when the gateway acknowledges the order.
    pub async fn run_once_at(&self, now: NaiveTime) -> Decision {
        // Session gates first, so an exhausted or closed session skips the
        // network round trip entirely.
        if let Some(reason) = self.engine.pre_gate(&self.session, now) {
            let decision = Decision::Hold(reason);
            self.count_decision(&decision);
            info!(
                symbol = %self.symbol,
                outcome = decision.label(),
                trades_today = self.session.trades_today(),
                "cycle held before fetch"
            );
            return decision;
        }

        if let Some(m) = &self.metrics {
            m.fetch_attempts_total.inc();
        }
        let candles = match self.provider.fetch_candles(&self.symbol, &self.interval).await {
            Ok(candles) => candles,
            Err(e) => {
                if let Some(m) = &self.metrics {
                    m.fetch_failures_total.with_label_values(&[e.label()]).inc();
                }
                warn!(symbol = %self.symbol, class = e.label(), error = %e, "no data this cycle");
                let decision = Decision::Hold(HoldReason::NoData);
                self.count_decision(&decision);
                return decision;
            }
        };

        let decision = self.engine.decide(&candles, &self.session, now);

        if let Decision::Trade(intent) = &decision {
            let _submission = self.session.submission_lock().await;
            // Another flow sharing this session may have consumed the last
            // slot while we waited for the lock.
            if self.session.is_exhausted() {
                let decision = Decision::Hold(HoldReason::CapReached);
                self.count_decision(&decision);
                info!(
                    symbol = %intent.symbol,
                    trades_today = self.session.trades_today(),
                    "trade cap reached while awaiting submission"
                );
                return decision;
            }
            self.count_decision(&decision);
            match self.gateway.place_order(intent).await {
                Ok(_ack) => {
                    self.session.record_fill();
                    if let Some(m) = &self.metrics {
                        m.orders_submitted_total.inc();
                    }
                    info!(
                        symbol = %intent.symbol,
                        side = intent.side.as_order_type(),
                        quantity = intent.quantity,
                        price = intent.price,
                        reason = ?intent.reason,
                        trades_today = self.session.trades_today(),
                        "order filled"
                    );
                }
                Err(e) => {
                    if let Some(m) = &self.metrics {
                        m.orders_failed_total.inc();
                    }
                    // Failed submission does not consume a trade slot.
                    error!(symbol = %intent.symbol, error = %e, "order submission failed");
                }
            }
        } else {
            self.count_decision(&decision);
            info!(symbol = %self.symbol, outcome = decision.label(), "no trade this cycle");
        }

        decision
    }

    /// Ticks `run_once` until shutdown is requested. Shutdown wins the
    /// select, so a cycle stuck in a backoff sleep is dropped rather than
    /// waited out.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.poll_interval);
        info!(
            symbol = %self.symbol,
            interval = %self.interval,
            poll_seconds = self.poll_interval.as_secs(),
            "live engine started"
        );

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    tokio::select! {
                        decision = self.run_once() => {
                            tracing::debug!(outcome = decision.label(), "cycle complete");
                        }
                        _ = shutdown.changed() => {
                            info!("shutdown requested mid-cycle, stopping live engine");
                            return;
                        }
                    }
                }
                _ = shutdown.changed() => {
                    info!("shutdown requested, stopping live engine");
                    return;
                }
            }
        }
    }

    fn count_decision(&self, decision: &Decision) {
        if let Some(m) = &self.metrics {
            m.decisions_total.with_label_values(&[decision.label()]).inc();
        }
    }
}
