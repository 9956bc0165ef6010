//! A listed stock, its valuation formulas and its trade history.

use crate::domain::error::StockError;
use crate::domain::trade_record::TradeRecord;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StockType {
    Common,
    Preferred,
}

impl fmt::Display for StockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockType::Common => write!(f, "Common"),
            StockType::Preferred => write!(f, "Preferred"),
        }
    }
}

impl FromStr for StockType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "common" => Ok(StockType::Common),
            "preferred" => Ok(StockType::Preferred),
            other => Err(format!("unknown stock type '{other}' (expected common or preferred)")),
        }
    }
}

/// A stock owns its trade record; the record lives exactly as long as the stock.
#[derive(Debug, Clone)]
pub struct Stock {
    symbol: String,
    stock_type: StockType,
    last_dividend: f64,
    par_value: f64,
    fixed_dividend: Option<f64>,
    trades: TradeRecord,
}

impl Stock {
    /// `fixed_dividend` is a percentage of par value; `None` or `Some(0.0)`
    /// both mean the stock has no fixed dividend.
    pub fn new(
        symbol: impl Into<String>,
        stock_type: StockType,
        last_dividend: f64,
        par_value: f64,
        fixed_dividend: Option<f64>,
    ) -> Result<Self, StockError> {
        check_non_negative("last_dividend", last_dividend)?;
        check_non_negative("par_value", par_value)?;
        if let Some(fixed) = fixed_dividend {
            check_non_negative("fixed_dividend", fixed)?;
        }
        Ok(Self {
            symbol: symbol.into(),
            stock_type,
            last_dividend,
            par_value,
            fixed_dividend: fixed_dividend.filter(|&f| f != 0.0),
            trades: TradeRecord::new(),
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn stock_type(&self) -> StockType {
        self.stock_type
    }

    pub fn last_dividend(&self) -> f64 {
        self.last_dividend
    }

    pub fn par_value(&self) -> f64 {
        self.par_value
    }

    pub fn has_fixed_dividend(&self) -> bool {
        self.fixed_dividend.is_some()
    }

    pub fn fixed_dividend(&self) -> Result<f64, StockError> {
        self.fixed_dividend.ok_or_else(|| StockError::InvalidOperation {
            reason: format!("stock {} has no fixed dividend", self.symbol),
        })
    }

    /// fixed_dividend * par_value / price when a fixed dividend is declared,
    /// last_dividend / price otherwise.
    pub fn dividend_yield(&self, price: f64) -> Result<f64, StockError> {
        if price.is_nan() || price <= 0.0 {
            return Err(StockError::invalid_argument("price", "must be positive"));
        }
        Ok(match self.fixed_dividend {
            Some(fixed) => fixed * self.par_value / price,
            None => self.last_dividend / price,
        })
    }

    /// price / last_dividend, or 0.0 when no dividend has been paid.
    // Uses the last declared dividend even for stocks with a fixed dividend.
    pub fn pe_ratio(&self, price: f64) -> f64 {
        if self.last_dividend == 0.0 {
            return 0.0;
        }
        price / self.last_dividend
    }

    pub fn trade_record(&self) -> &TradeRecord {
        &self.trades
    }

    pub fn trade_record_mut(&mut self) -> &mut TradeRecord {
        &mut self.trades
    }
}

fn check_non_negative(field: &'static str, value: f64) -> Result<(), StockError> {
    if !value.is_finite() {
        return Err(StockError::invalid_argument(field, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(StockError::invalid_argument(field, "cannot be negative"));
    }
    Ok(())
}

impl fmt::Display for Stock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stock: symbol {}, type {}, last dividend {}",
            self.symbol, self.stock_type, self.last_dividend
        )?;
        if let Some(fixed) = self.fixed_dividend {
            write!(f, " (fixed {}%)", fixed)?;
        }
        write!(f, ", par value {}.", self.par_value)
    }
}
