//! Time source port.

use chrono::{DateTime, Utc};

/// Supplies the current instant. Substitutable so windowed queries can be
/// evaluated against a pinned "now".
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}
