//! Plain-text trade record tables.

use crate::domain::error::StockError;
use crate::domain::trade_record::TradeRecord;
use crate::ports::report_port::ReportPort;
use std::io::Write;

const RULE: &str =
    "-------------------------------------------------------------------------------";

const TIME_FORMAT: &str = "%H:%M:%S";

/// Renders one table per record: title, header row, one row per trade, oldest first.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextReportAdapter;

impl TextReportAdapter {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, title: &str, record: &TradeRecord) -> String {
        let mut out = String::new();
        out.push_str(&format!("\tTrade Record for {title}\n"));
        out.push_str(RULE);
        out.push('\n');
        out.push_str(&format!(
            "{:<10}{:<14}{:>12}  {}\n",
            "Quantity", "Buy Or Sell", "Price", "Time stamp"
        ));
        for trade in record {
            out.push_str(&format!(
                "{:<10}{:<14}{:>12.2}  {}\n",
                trade.quantity(),
                trade.direction().to_string(),
                trade.price(),
                trade.timestamp().format(TIME_FORMAT)
            ));
        }
        out.push_str(RULE);
        out.push_str("\n\n");
        out
    }
}

impl ReportPort for TextReportAdapter {
    fn write(
        &self,
        title: &str,
        record: &TradeRecord,
        out: &mut dyn Write,
    ) -> Result<(), StockError> {
        out.write_all(self.render(title, record).as_bytes())?;
        Ok(())
    }
}
