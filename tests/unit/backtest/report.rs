//! Unit tests for paired-trade profit accounting

use chrono::{Duration, TimeZone, Utc};
use tradewind::backtest::report;
use tradewind::models::{BacktestTrade, Side};

fn trades(legs: &[(Side, f64)]) -> Vec<BacktestTrade> {
    let start = Utc.with_ymd_and_hms(2024, 1, 2, 9, 15, 0).unwrap();
    legs.iter()
        .enumerate()
        .map(|(i, &(side, price))| BacktestTrade {
            side,
            timestamp: start + Duration::minutes(i as i64 * 5),
            price,
        })
        .collect()
}

#[test]
fn scores_buy_sell_and_sell_buy_pairs() {
    let trades = trades(&[
        (Side::Buy, 10.0),
        (Side::Sell, 15.0),
        (Side::Sell, 20.0),
        (Side::Buy, 12.0),
    ]);
    let report = report(&trades);

    assert_eq!(report.pairs.len(), 2);
    assert_eq!(report.pairs[0].profit, 5.0);
    assert_eq!(report.pairs[0].buy_price, 10.0);
    assert_eq!(report.pairs[0].sell_price, 15.0);
    assert_eq!(report.pairs[1].profit, 8.0);
    assert_eq!(report.pairs[1].buy_price, 12.0);
    assert_eq!(report.pairs[1].sell_price, 20.0);
    assert_eq!(report.total_profit, 13.0);
}

#[test]
fn same_side_pairs_are_not_scored() {
    let trades = trades(&[
        (Side::Buy, 10.0),
        (Side::Buy, 11.0),
        (Side::Buy, 10.0),
        (Side::Sell, 15.0),
    ]);
    let report = report(&trades);

    assert_eq!(report.pairs.len(), 1);
    assert_eq!(report.pairs[0].profit, 5.0);
    assert_eq!(report.total_profit, 5.0);
}

#[test]
fn trailing_unpaired_trade_is_ignored() {
    let trades = trades(&[(Side::Buy, 10.0), (Side::Sell, 15.0), (Side::Buy, 20.0)]);
    let report = report(&trades);

    assert_eq!(report.pairs.len(), 1);
    assert_eq!(report.total_profit, 5.0);
}

#[test]
fn losing_round_trips_score_negative() {
    let trades = trades(&[(Side::Buy, 20.0), (Side::Sell, 15.0)]);
    let report = report(&trades);
    assert_eq!(report.total_profit, -5.0);
}

#[test]
fn empty_and_single_trade_reports_are_zero() {
    assert_eq!(report(&[]).total_profit, 0.0);
    assert!(report(&[]).pairs.is_empty());

    let one = trades(&[(Side::Sell, 30.0)]);
    assert_eq!(report(&one).total_profit, 0.0);
    assert!(report(&one).pairs.is_empty());
}
