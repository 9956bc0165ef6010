//! CSV trade file adapter.
//!
//! Columns: `symbol,timestamp,quantity,direction,price`, with RFC 3339
//! timestamps. A header row is expected on read and written on write.

use crate::domain::error::StockError;
use crate::domain::trade::{Direction, Trade};
use crate::ports::trade_port::{SymbolTrade, TradePort};
use chrono::{DateTime, SecondsFormat, Utc};
use std::path::PathBuf;

pub const HEADER: [&str; 5] = ["symbol", "timestamp", "quantity", "direction", "price"];

pub struct CsvTradeAdapter {
    path: PathBuf,
}

impl CsvTradeAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn data_error(&self, line: u64, reason: impl std::fmt::Display) -> StockError {
        StockError::TradeData {
            reason: format!("{}:{}: {}", self.path.display(), line, reason),
        }
    }

    fn parse_record(&self, record: &csv::StringRecord, line: u64) -> Result<SymbolTrade, StockError> {
        let field = |idx: usize| {
            record
                .get(idx)
                .map(str::trim)
                .ok_or_else(|| self.data_error(line, format!("missing {} column", HEADER[idx])))
        };

        let symbol = field(0)?.to_uppercase();
        if symbol.is_empty() {
            return Err(self.data_error(line, "empty symbol"));
        }
        let timestamp = DateTime::parse_from_rfc3339(field(1)?)
            .map_err(|e| self.data_error(line, format!("invalid timestamp: {e}")))?
            .with_timezone(&Utc);
        let quantity: u32 = field(2)?
            .parse()
            .map_err(|e| self.data_error(line, format!("invalid quantity: {e}")))?;
        let direction: Direction = field(3)?
            .parse()
            .map_err(|e| self.data_error(line, e))?;
        let price: f64 = field(4)?
            .parse()
            .map_err(|e| self.data_error(line, format!("invalid price: {e}")))?;

        let trade = Trade::new(quantity, direction, price, timestamp)?;
        Ok(SymbolTrade { symbol, trade })
    }
}

impl TradePort for CsvTradeAdapter {
    fn read_trades(&self) -> Result<Vec<SymbolTrade>, StockError> {
        let mut rdr = csv::Reader::from_path(&self.path).map_err(|e| StockError::TradeData {
            reason: format!("failed to open {}: {}", self.path.display(), e),
        })?;

        let mut trades = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| StockError::TradeData {
                reason: format!("CSV parse error in {}: {}", self.path.display(), e),
            })?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            trades.push(self.parse_record(&record, line)?);
        }

        log::debug!("read {} trades from {}", trades.len(), self.path.display());
        Ok(trades)
    }

    fn write_trades(&self, trades: &[SymbolTrade]) -> Result<usize, StockError> {
        let csv_error = |e: csv::Error| StockError::TradeData {
            reason: format!("failed to write {}: {}", self.path.display(), e),
        };

        let mut wtr = csv::Writer::from_path(&self.path).map_err(csv_error)?;
        wtr.write_record(HEADER).map_err(csv_error)?;
        for SymbolTrade { symbol, trade } in trades {
            wtr.write_record([
                symbol.clone(),
                trade.timestamp().to_rfc3339_opts(SecondsFormat::AutoSi, true),
                trade.quantity().to_string(),
                trade.direction().to_string(),
                trade.price().to_string(),
            ])
            .map_err(csv_error)?;
        }
        wtr.flush()?;

        log::debug!("wrote {} trades to {}", trades.len(), self.path.display());
        Ok(trades.len())
    }
}
