//! Prometheus counters for the live and backtest flows.

use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

pub struct Metrics {
    registry: Registry,
    pub fetch_attempts_total: IntCounter,
    pub fetch_failures_total: IntCounterVec,
    pub decisions_total: IntCounterVec,
    pub orders_submitted_total: IntCounter,
    pub orders_failed_total: IntCounter,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let fetch_attempts_total = IntCounter::new(
            "fetch_attempts_total",
            "Historical data fetch operations started by the live loop",
        )?;
        let fetch_failures_total = IntCounterVec::new(
            Opts::new("fetch_failures_total", "Fetch failures by error class"),
            &["class"],
        )?;
        let decisions_total = IntCounterVec::new(
            Opts::new("decisions_total", "Live decisions by outcome"),
            &["outcome"],
        )?;
        let orders_submitted_total = IntCounter::new(
            "orders_submitted_total",
            "Orders acknowledged by the gateway",
        )?;
        let orders_failed_total = IntCounter::new(
            "orders_failed_total",
            "Order submissions rejected or lost in transport",
        )?;

        registry.register(Box::new(fetch_attempts_total.clone()))?;
        registry.register(Box::new(fetch_failures_total.clone()))?;
        registry.register(Box::new(decisions_total.clone()))?;
        registry.register(Box::new(orders_submitted_total.clone()))?;
        registry.register(Box::new(orders_failed_total.clone()))?;

        Ok(Self {
            registry,
            fetch_attempts_total,
            fetch_failures_total,
            decisions_total,
            orders_submitted_total,
            orders_failed_total,
        })
    }

    /// Export all metrics in Prometheus text format.
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
