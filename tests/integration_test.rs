//! End-to-end behaviour of trade records, stocks and the All Share Index.

mod common;

use approx::assert_relative_eq;
use chrono::Duration;
use common::*;
use stockbook::domain::error::StockError;
use stockbook::domain::market_config::default_market;
use stockbook::domain::stock::StockType;
use stockbook::domain::stock_group::StockGroup;
use stockbook::domain::trade::Direction;
use stockbook::domain::trade_record::TradeRecord;

mod valuation {
    use super::*;

    #[test]
    fn tea_yield_with_zero_dividend() {
        let group = default_market().unwrap();
        let tea = group.stock("TEA").unwrap();
        assert_eq!(tea.dividend_yield(50.0).unwrap(), 0.0);
    }

    #[test]
    fn gin_yield_uses_fixed_dividend() {
        let group = default_market().unwrap();
        let gin = group.stock("GIN").unwrap();
        assert_relative_eq!(gin.dividend_yield(30.0).unwrap(), 6.666_666_666_666_667, max_relative = 1e-12);
    }

    #[test]
    fn pe_ratios_of_sample_market() {
        let group = default_market().unwrap();
        assert_eq!(group.stock("TEA").unwrap().pe_ratio(75.0), 0.0);
        assert_relative_eq!(group.stock("ALE").unwrap().pe_ratio(60.0), 60.0 / 23.0);
        assert_relative_eq!(group.stock("ALE").unwrap().pe_ratio(120.0), 120.0 / 23.0);
        assert_relative_eq!(group.stock("JOE").unwrap().pe_ratio(33.0), 33.0 / 13.0);
    }

    #[test]
    fn missing_stock_is_not_found() {
        let group = default_market().unwrap();
        let err = group.stock("TONIC").unwrap_err();
        assert!(matches!(err, StockError::NotFound { symbol } if symbol == "TONIC"));
    }
}

mod windows {
    use super::*;

    #[test]
    fn recent_then_stale_then_wide() {
        let clock = clock();
        let mut record = TradeRecord::new();

        record.append_at(10, Direction::Buy, 20.0, minutes_ago(1)).unwrap();
        assert_eq!(record.volume_weighted_price_within(&clock, Duration::minutes(5)), Some(20.0));

        let wide_before = record.volume_weighted_price_within(&clock, Duration::minutes(15));
        record.append_at(10, Direction::Buy, 20.0, minutes_ago(6)).unwrap();

        assert_eq!(record.volume_weighted_price_within(&clock, Duration::minutes(5)), Some(20.0));
        let in_wide = record
            .iter()
            .filter(|t| t.timestamp() >= minutes_ago(15))
            .count();
        assert_eq!(in_wide, 2);
        assert_eq!(wide_before, Some(20.0));
    }

    #[test]
    fn trade_inside_window_moves_price() {
        let clock = clock();
        let mut record = TradeRecord::new();
        record.append_at(10, Direction::Buy, 20.0, minutes_ago(1)).unwrap();
        record.append_at(10, Direction::Sell, 40.0, minutes_ago(2)).unwrap();
        assert_relative_eq!(
            record.volume_weighted_price_within_five_minutes(&clock).unwrap(),
            30.0
        );
    }

    #[test]
    fn trade_outside_window_changes_wider_window() {
        let clock = clock();
        let mut record = TradeRecord::new();
        record.append_at(10, Direction::Buy, 20.0, minutes_ago(1)).unwrap();
        record.append_at(30, Direction::Buy, 40.0, minutes_ago(6)).unwrap();

        assert_eq!(record.volume_weighted_price_within_five_minutes(&clock), Some(20.0));
        assert_relative_eq!(
            record.volume_weighted_price_within(&clock, Duration::minutes(15)).unwrap(),
            35.0
        );
    }

    #[test]
    fn stamped_appends_use_clock() {
        let clock = clock();
        let mut record = TradeRecord::new();
        record.append(&clock, 5, Direction::Buy, 10.0).unwrap();
        record.append(&clock, 5, Direction::Sell, 30.0).unwrap();
        assert_eq!(record.len(), 2);
        assert_relative_eq!(
            record.volume_weighted_price_within_five_minutes(&clock).unwrap(),
            20.0
        );
    }
}

mod all_share_index {
    use super::*;

    #[test]
    fn sample_market_index() {
        let mut group = default_market().unwrap();
        buy(&mut group, "TEA", 10, 20.0, 1);
        buy(&mut group, "POP", 10, 45.0, 2);
        buy(&mut group, "GIN", 10, 60.0, 3);

        let expected = (20.0_f64 * 45.0 * 60.0).powf(1.0 / 3.0);
        assert_relative_eq!(
            group.all_share_index_within_five_minutes(&clock()),
            expected,
            max_relative = 1e-12
        );
    }

    #[test]
    fn stale_only_market_index_is_zero() {
        let mut group = default_market().unwrap();
        buy(&mut group, "TEA", 10, 20.0, 6);
        assert_eq!(group.all_share_index_within_five_minutes(&clock()), 0.0);
        assert_relative_eq!(
            group.all_share_index_within(&clock(), Duration::minutes(15)),
            20.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn index_is_recomputed_after_new_trades() {
        let mut group = StockGroup::new();
        group.add_stock("AAA", StockType::Common, 1.0, 1.0, None).unwrap();
        group.add_stock("BBB", StockType::Common, 1.0, 1.0, None).unwrap();
        buy(&mut group, "AAA", 1, 4.0, 1);
        let first = group.all_share_index_within_five_minutes(&clock());
        buy(&mut group, "BBB", 1, 9.0, 1);
        let second = group.all_share_index_within_five_minutes(&clock());

        assert_relative_eq!(first, 4.0, max_relative = 1e-12);
        assert_relative_eq!(second, 6.0, max_relative = 1e-12);
    }
}
