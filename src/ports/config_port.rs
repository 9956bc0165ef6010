//! Configuration access port trait.

use crate::domain::error::StockError;

pub trait ConfigPort {
    /// Raw value of `key` in `section`; typed parsing is left to the caller
    /// so malformed values can be reported.
    fn get_string(&self, section: &str, key: &str) -> Option<String>;

    /// Like [`get_string`](Self::get_string), but a missing key is an error.
    fn require_string(&self, section: &str, key: &str) -> Result<String, StockError> {
        self.get_string(section, key)
            .ok_or_else(|| StockError::ConfigMissing {
                section: section.into(),
                key: key.into(),
            })
    }
}
