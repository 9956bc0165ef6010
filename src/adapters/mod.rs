//! Concrete adapter implementations for ports.

pub mod clock_adapter;
pub mod csv_trade_adapter;
pub mod file_config_adapter;
pub mod text_report_adapter;
