//! Port traits: the seams between the domain and the outside world.

pub mod clock_port;
pub mod config_port;
pub mod report_port;
pub mod trade_port;
