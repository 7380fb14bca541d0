//! Offline backtest entrypoint.
//!
//! Fetches the historical series once, replays the decision rules over the
//! configured range, and logs the paired-trade report.

use chrono::{DateTime, NaiveDate, Utc};
use dotenvy::dotenv;
use std::env;
use tracing::{error, info};
use tradewind::backtest::backtest;
use tradewind::config::Config;
use tradewind::logging;
use tradewind::services::market_data::MarketDataProvider;
use tradewind::services::RestMarketData;

fn parse_date(key: &str) -> Result<DateTime<Utc>, Box<dyn std::error::Error>> {
    let raw = env::var(key).map_err(|_| format!("{key} is required (YYYY-MM-DD)"))?;
    let date = NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .map_err(|e| format!("invalid {key}: {e}"))?;
    Ok(date
        .and_hms_opt(0, 0, 0)
        .expect("midnight is valid")
        .and_utc())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let config = Config::from_env()?;
    let start = parse_date("BACKTEST_START")?;
    // The end date is inclusive: extend to the last instant of that day.
    let end = parse_date("BACKTEST_END")? + chrono::Duration::days(1) - chrono::Duration::seconds(1);

    info!(
        symbol = %config.strategy.symbol,
        interval = %config.interval,
        %start,
        %end,
        "starting backtest"
    );

    let provider = RestMarketData::from_config(&config.api);
    let candles = match provider
        .fetch_candles(&config.strategy.symbol, &config.interval)
        .await
    {
        Ok(candles) => candles,
        Err(e) => {
            error!(error = %e, "no data retrieved for backtest");
            return Ok(());
        }
    };

    let summary = backtest(&candles, start, end, &config);
    info!(
        trades = summary.trades.len(),
        pairs = summary.report.pairs.len(),
        total_profit = summary.report.total_profit,
        "backtest finished"
    );
    Ok(())
}
