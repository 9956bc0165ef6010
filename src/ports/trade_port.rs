//! Trade import/export port trait.

use crate::domain::error::StockError;
use crate::domain::trade::Trade;

/// A trade tagged with the symbol it was executed on.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolTrade {
    pub symbol: String,
    pub trade: Trade,
}

pub trait TradePort {
    fn read_trades(&self) -> Result<Vec<SymbolTrade>, StockError>;

    /// Returns the number of trades written.
    fn write_trades(&self, trades: &[SymbolTrade]) -> Result<usize, StockError>;
}
