#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use std::io::Write;
use stockbook::adapters::clock_adapter::FixedClock;
use stockbook::domain::stock_group::StockGroup;
use stockbook::domain::trade::Direction;
use stockbook::domain::trade_record::TradeRecord;

pub fn noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

pub fn clock() -> FixedClock {
    FixedClock::new(noon())
}

pub fn minutes_ago(m: i64) -> DateTime<Utc> {
    noon() - Duration::minutes(m)
}

pub fn seconds_ago(s: i64) -> DateTime<Utc> {
    noon() - Duration::seconds(s)
}

/// Build a record from `(quantity, price, seconds_ago)` triples.
pub fn record_from(trades: &[(u32, f64, i64)]) -> TradeRecord {
    let mut record = TradeRecord::new();
    for &(quantity, price, ago) in trades {
        record
            .append_at(quantity, Direction::Buy, price, seconds_ago(ago))
            .unwrap();
    }
    record
}

pub fn buy(group: &mut StockGroup, symbol: &str, quantity: u32, price: f64, minutes: i64) {
    group
        .stock_mut(symbol)
        .unwrap()
        .trade_record_mut()
        .append_at(quantity, Direction::Buy, price, minutes_ago(minutes))
        .unwrap();
}

pub fn write_temp(content: &str, suffix: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

pub const MARKET_INI: &str = r#"
[market]
symbols = TEA,POP,GIN
window_minutes = 5
seed = 11

[stock.TEA]
type = common
last_dividend = 0
par_value = 100

[stock.POP]
type = common
last_dividend = 8
par_value = 100

[stock.GIN]
type = preferred
last_dividend = 8
fixed_dividend = 2
par_value = 100
"#;
