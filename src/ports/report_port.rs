//! Trade record reporting port trait.

use crate::domain::error::StockError;
use crate::domain::stock_group::StockGroup;
use crate::domain::trade_record::TradeRecord;
use std::io::Write;

/// Port for rendering trade records.
pub trait ReportPort {
    fn write(&self, title: &str, record: &TradeRecord, out: &mut dyn Write)
        -> Result<(), StockError>;

    /// Default implementation: one `write` per stock, in symbol order.
    fn write_group(&self, group: &StockGroup, out: &mut dyn Write) -> Result<(), StockError> {
        for stock in group.stocks() {
            self.write(stock.symbol(), stock.trade_record(), out)?;
        }
        Ok(())
    }
}
