//! Market configuration: which stocks exist and how they are queried.
//!
//! ```ini
//! [market]
//! symbols = TEA,POP,GIN
//! window_minutes = 5
//! seed = 42
//!
//! [stock.GIN]
//! type = preferred
//! last_dividend = 8
//! fixed_dividend = 2
//! par_value = 100
//! ```

use crate::domain::error::StockError;
use crate::domain::stock::StockType;
use crate::domain::stock_group::StockGroup;
use crate::ports::config_port::ConfigPort;
use chrono::Duration;
use std::collections::HashSet;
use std::str::FromStr;

pub const DEFAULT_WINDOW_MINUTES: i64 = 5;
pub const DEFAULT_SEED: u64 = 42;

#[derive(Debug, Clone, PartialEq)]
pub struct MarketSettings {
    pub window: Duration,
    pub seed: u64,
}

impl Default for MarketSettings {
    fn default() -> Self {
        Self {
            window: Duration::minutes(DEFAULT_WINDOW_MINUTES),
            seed: DEFAULT_SEED,
        }
    }
}

/// The sample market: TEA, POP, ALE, GIN and JOE.
pub fn default_market() -> Result<StockGroup, StockError> {
    let mut group = StockGroup::new();
    group.add_stock("TEA", StockType::Common, 0.0, 100.0, None)?;
    group.add_stock("POP", StockType::Common, 8.0, 100.0, None)?;
    group.add_stock("ALE", StockType::Common, 23.0, 60.0, None)?;
    group.add_stock("GIN", StockType::Preferred, 8.0, 100.0, Some(2.0))?;
    group.add_stock("JOE", StockType::Common, 13.0, 250.0, None)?;
    Ok(group)
}

/// Split a comma separated symbol list, upper-casing each entry.
pub fn parse_symbols(input: &str) -> Result<Vec<String>, StockError> {
    let mut symbols = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let symbol = token.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(invalid("market", "symbols", "empty symbol in list"));
        }
        if !seen.insert(symbol.clone()) {
            return Err(invalid("market", "symbols", &format!("duplicate symbol {symbol}")));
        }
        symbols.push(symbol);
    }

    Ok(symbols)
}

pub fn build_market_settings(config: &dyn ConfigPort) -> Result<MarketSettings, StockError> {
    let window_minutes: i64 =
        parse_key(config, "market", "window_minutes")?.unwrap_or(DEFAULT_WINDOW_MINUTES);
    if window_minutes <= 0 {
        return Err(invalid("market", "window_minutes", "window_minutes must be positive"));
    }
    let window = Duration::try_minutes(window_minutes)
        .ok_or_else(|| invalid("market", "window_minutes", "window_minutes is out of range"))?;
    let seed = parse_key(config, "market", "seed")?.unwrap_or(DEFAULT_SEED);

    Ok(MarketSettings { window, seed })
}

/// Build the registry from `[market] symbols` and one `[stock.SYMBOL]` section
/// per listed symbol.
pub fn build_stock_group(config: &dyn ConfigPort) -> Result<StockGroup, StockError> {
    let symbols = parse_symbols(&config.require_string("market", "symbols")?)?;
    let mut group = StockGroup::new();

    for symbol in symbols {
        let section = format!("stock.{symbol}");

        let stock_type = config.require_string(&section, "type")?;
        let stock_type = StockType::from_str(&stock_type)
            .map_err(|reason| invalid(&section, "type", &reason))?;

        let last_dividend: f64 = parse_key(config, &section, "last_dividend")?.ok_or_else(|| {
            StockError::ConfigMissing {
                section: section.clone(),
                key: "last_dividend".into(),
            }
        })?;
        let par_value: f64 = parse_key(config, &section, "par_value")?.ok_or_else(|| {
            StockError::ConfigMissing {
                section: section.clone(),
                key: "par_value".into(),
            }
        })?;
        let fixed_dividend: Option<f64> = parse_key(config, &section, "fixed_dividend")?;

        group
            .add_stock(&symbol, stock_type, last_dividend, par_value, fixed_dividend)
            .map_err(|e| match e {
                StockError::InvalidArgument { field, reason } => invalid(&section, field, &reason),
                other => other,
            })?;
    }

    Ok(group)
}

fn parse_key<T: FromStr>(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<Option<T>, StockError> {
    match config.get_string(section, key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| invalid(section, key, &format!("cannot parse '{}'", raw.trim()))),
    }
}

fn invalid(section: &str, key: &str, reason: &str) -> StockError {
    StockError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
