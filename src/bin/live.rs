//! Live trading entrypoint.
//!
//! Loads configuration from the environment, starts the periodic decision
//! loop, and stops cleanly on ctrl-c without waiting out a pending backoff.

use dotenvy::dotenv;
use std::sync::Arc;
use tokio::signal;
use tokio::sync::watch;
use tracing::info;
use tradewind::config::{get_environment, Config};
use tradewind::core::LiveEngine;
use tradewind::logging;
use tradewind::metrics::Metrics;
use tradewind::models::TradeSession;
use tradewind::services::{RestMarketData, RestOrderGateway};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let config = Config::from_env()?;
    info!(environment = %get_environment(), "starting tradewind live engine");
    info!(
        symbol = %config.strategy.symbol,
        interval = %config.interval,
        max_trades_per_day = config.session.max_trades_per_day,
        "session configuration loaded"
    );

    let metrics = Arc::new(Metrics::new()?);
    let provider = Arc::new(RestMarketData::from_config(&config.api));
    let gateway = Arc::new(RestOrderGateway::new(
        config.api.base_url.clone(),
        config.api.access_token.clone(),
    ));
    let session = Arc::new(TradeSession::new(config.session.max_trades_per_day));

    let engine = LiveEngine::new(&config, provider, gateway, session.clone())
        .with_metrics(metrics.clone());

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let run = tokio::spawn(async move { engine.run(shutdown_rx).await });

    signal::ctrl_c().await?;
    info!("shutting down...");
    let _ = shutdown_tx.send(true);
    run.await?;

    info!(trades_today = session.trades_today(), "live engine stopped");
    if let Ok(snapshot) = metrics.export() {
        info!("final metrics:\n{}", snapshot);
    }
    Ok(())
}
