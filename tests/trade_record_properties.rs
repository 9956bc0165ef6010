//! Property tests for trade ordering and windowed prices.

mod common;

use chrono::Duration;
use common::*;
use proptest::prelude::*;
use stockbook::domain::stock_group::geometric_mean;
use stockbook::domain::trade::{Direction, Trade};
use stockbook::domain::trade_record::TradeRecord;

fn arb_quantity() -> impl Strategy<Value = u32> {
    1u32..10_000u32
}

fn arb_price() -> impl Strategy<Value = f64> {
    0.01f64..1_000.0f64
}

/// Seconds before noon, kept within an hour.
fn arb_age() -> impl Strategy<Value = i64> {
    0i64..3_600i64
}

fn arb_direction() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::Buy), Just(Direction::Sell)]
}

fn arb_trades() -> impl Strategy<Value = Vec<(u32, f64, i64)>> {
    prop::collection::vec((arb_quantity(), arb_price(), arb_age()), 0..60)
}

fn brute_force_vwap(trades: &[(u32, f64, i64)], max_age: i64) -> Option<f64> {
    let selected: Vec<_> = trades.iter().filter(|t| t.2 <= max_age).collect();
    if selected.is_empty() {
        return None;
    }
    let quantity: f64 = selected.iter().map(|t| f64::from(t.0)).sum();
    let notional: f64 = selected.iter().map(|t| f64::from(t.0) * t.1).sum();
    Some(notional / quantity)
}

proptest! {
    #[test]
    fn prop_record_holds_each_trade_in_time_order(trades in arb_trades()) {
        let record = record_from(&trades);

        // Oldest first; a stable sort keeps insertion order among equal ages.
        let mut expected: Vec<(u32, f64, i64)> = trades.clone();
        expected.sort_by_key(|t| std::cmp::Reverse(t.2));
        let expected: Vec<_> = expected
            .into_iter()
            .map(|(q, p, age)| (q, p, seconds_ago(age)))
            .collect();

        let got: Vec<_> = record
            .iter()
            .map(|t| (t.quantity(), t.price(), t.timestamp()))
            .collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn prop_window_matches_brute_force(trades in arb_trades(), window_secs in 1i64..4_000i64) {
        let record = record_from(&trades);
        let got = record.volume_weighted_price_within(&clock(), Duration::seconds(window_secs));
        let expected = brute_force_vwap(&trades, window_secs);

        match (got, expected) {
            (None, None) => {}
            (Some(g), Some(e)) => prop_assert!((g - e).abs() <= 1e-9 * e.abs().max(1.0)),
            other => prop_assert!(false, "mismatch: {:?}", other),
        }
    }

    #[test]
    fn prop_vwap_lies_between_extreme_prices(trades in arb_trades()) {
        let record = record_from(&trades);
        if let Some(vwap) = record.volume_weighted_price_since(minutes_ago(60)) {
            let lo = trades.iter().map(|t| t.1).fold(f64::INFINITY, f64::min);
            let hi = trades.iter().map(|t| t.1).fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(vwap >= lo - 1e-9 && vwap <= hi + 1e-9);
        } else {
            prop_assert!(trades.is_empty());
        }
    }

    #[test]
    fn prop_wider_window_never_loses_trades(
        trades in arb_trades(),
        narrow in 1i64..1_800i64,
        extra in 0i64..1_800i64,
    ) {
        let record = record_from(&trades);
        let narrow_price = record.volume_weighted_price_within(&clock(), Duration::seconds(narrow));
        let wide_price = record.volume_weighted_price_within(&clock(), Duration::seconds(narrow + extra));
        if narrow_price.is_some() {
            prop_assert!(wide_price.is_some());
        }
    }

    #[test]
    fn prop_equal_timestamps_keep_insertion_order(
        quantities in prop::collection::vec(arb_quantity(), 1..20),
        direction in arb_direction(),
    ) {
        let mut record = TradeRecord::new();
        record.append_at(1, direction, 1.0, minutes_ago(10)).unwrap();
        for &q in &quantities {
            record.append_at(q, direction, 2.0, noon()).unwrap();
        }
        record.append_at(1, direction, 3.0, minutes_ago(20)).unwrap();

        let tail: Vec<u32> = record.iter().skip(2).map(Trade::quantity).collect();
        prop_assert_eq!(tail, quantities);
    }

    #[test]
    fn prop_zero_quantity_is_rejected(price in arb_price(), age in arb_age()) {
        prop_assert!(Trade::new(0, Direction::Buy, price, seconds_ago(age)).is_err());
    }

    #[test]
    fn prop_negative_price_is_rejected(q in arb_quantity(), price in 0.01f64..1_000.0f64) {
        prop_assert!(Trade::new(q, Direction::Sell, -price, noon()).is_err());
    }

    #[test]
    fn prop_geometric_mean_of_equal_values(value in 0.01f64..1e6f64, n in 1usize..30usize) {
        let mean = geometric_mean(&vec![value; n]).unwrap();
        prop_assert!((mean - value).abs() <= 1e-9 * value);
    }
}
