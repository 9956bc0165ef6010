//! Domain error types.

/// Top-level error type for stockbook.
#[derive(Debug, thiserror::Error)]
pub enum StockError {
    #[error("invalid argument `{field}`: {reason}")]
    InvalidArgument { field: &'static str, reason: String },

    #[error("invalid operation: {reason}")]
    InvalidOperation { reason: String },

    #[error("stock {symbol} does not exist")]
    NotFound { symbol: String },

    #[error("stock {symbol} already exists")]
    AlreadyExists { symbol: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("trade data error: {reason}")]
    TradeData { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl StockError {
    pub(crate) fn invalid_argument(field: &'static str, reason: impl Into<String>) -> Self {
        StockError::InvalidArgument {
            field,
            reason: reason.into(),
        }
    }
}

impl From<&StockError> for std::process::ExitCode {
    fn from(err: &StockError) -> Self {
        let code: u8 = match err {
            StockError::Io(_) => 1,
            StockError::ConfigParse { .. }
            | StockError::ConfigMissing { .. }
            | StockError::ConfigInvalid { .. } => 2,
            StockError::NotFound { .. } | StockError::AlreadyExists { .. } => 3,
            StockError::InvalidArgument { .. } | StockError::InvalidOperation { .. } => 4,
            StockError::TradeData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
