//! Registry of stocks keyed by symbol, and the All Share Index built from
//! their volume weighted prices.

use crate::domain::error::StockError;
use crate::domain::stock::{Stock, StockType};
use crate::domain::trade::Trade;
use crate::domain::trade_record::FIVE_MINUTES;
use crate::ports::clock_port::Clock;
use crate::ports::trade_port::SymbolTrade;
use chrono::Duration;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct StockGroup {
    stocks: BTreeMap<String, Stock>,
}

impl StockGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_stock(&self, symbol: &str) -> bool {
        self.stocks.contains_key(symbol)
    }

    pub fn stock(&self, symbol: &str) -> Result<&Stock, StockError> {
        self.stocks.get(symbol).ok_or_else(|| StockError::NotFound {
            symbol: symbol.to_string(),
        })
    }

    pub fn stock_mut(&mut self, symbol: &str) -> Result<&mut Stock, StockError> {
        self.stocks.get_mut(symbol).ok_or_else(|| StockError::NotFound {
            symbol: symbol.to_string(),
        })
    }

    /// Build a stock from its fields and register it.
    ///
    /// Fails with [`StockError::AlreadyExists`] if the symbol is taken, or with
    /// the validation errors of [`Stock::new`].
    pub fn add_stock(
        &mut self,
        symbol: &str,
        stock_type: StockType,
        last_dividend: f64,
        par_value: f64,
        fixed_dividend: Option<f64>,
    ) -> Result<&mut Stock, StockError> {
        if self.has_stock(symbol) {
            return Err(StockError::AlreadyExists {
                symbol: symbol.to_string(),
            });
        }
        let stock = Stock::new(symbol, stock_type, last_dividend, par_value, fixed_dividend)?;
        Ok(self.stocks.entry(symbol.to_string()).or_insert(stock))
    }

    /// Insert an existing trade into the named stock's record.
    pub fn record_trade(&mut self, symbol: &str, trade: Trade) -> Result<(), StockError> {
        self.stock_mut(symbol)?.trade_record_mut().insert(trade);
        Ok(())
    }

    /// Record every trade, stopping at the first unknown symbol.
    pub fn load_trades<I>(&mut self, trades: I) -> Result<usize, StockError>
    where
        I: IntoIterator<Item = SymbolTrade>,
    {
        let mut count = 0;
        for SymbolTrade { symbol, trade } in trades {
            self.record_trade(&symbol, trade)?;
            count += 1;
        }
        Ok(count)
    }

    /// Every trade of every stock, ordered by timestamp then symbol.
    pub fn all_trades(&self) -> Vec<SymbolTrade> {
        let mut trades: Vec<SymbolTrade> = self
            .stocks
            .values()
            .flat_map(|stock| {
                stock.trade_record().iter().map(|trade| SymbolTrade {
                    symbol: stock.symbol().to_string(),
                    trade: trade.clone(),
                })
            })
            .collect();
        // Stable sort: per-stock insertion order survives among equal timestamps.
        trades.sort_by_key(|t| t.trade.timestamp());
        trades
    }

    /// All stocks in symbol order.
    pub fn stocks(&self) -> impl Iterator<Item = &Stock> {
        self.stocks.values()
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.stocks.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.stocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stocks.is_empty()
    }

    /// Geometric mean of the volume weighted prices over `window`.
    ///
    /// Stocks without trades in the window are left out rather than counted
    /// as zero. An empty group, or one where no stock traded in the window,
    /// has an index of 0.0.
    pub fn all_share_index_within(&self, clock: &dyn Clock, window: Duration) -> f64 {
        let prices: Vec<f64> = self
            .stocks
            .values()
            .filter_map(|s| s.trade_record().volume_weighted_price_within(clock, window))
            .collect();
        geometric_mean(&prices).unwrap_or(0.0)
    }

    pub fn all_share_index_within_five_minutes(&self, clock: &dyn Clock) -> f64 {
        self.all_share_index_within(clock, FIVE_MINUTES)
    }
}

/// n-th root of the product of `values`, or `None` for an empty slice.
///
/// Summed in log space so that long products cannot overflow. Any zero value
/// makes the mean zero.
pub fn geometric_mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    if values.iter().any(|&v| v == 0.0) {
        return Some(0.0);
    }
    let log_sum: f64 = values.iter().map(|v| v.ln()).sum();
    Some((log_sum / values.len() as f64).exp())
}
