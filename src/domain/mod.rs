//! Core domain types and logic.

pub mod trade;
pub mod trade_record;
pub mod stock;
pub mod stock_group;
pub mod market_config;
pub mod error;
