//! Centralized error types for Tonika.

use thiserror::Error;

/// Main error type for Tonika operations.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A required spreadsheet column is absent. Reported to API callers
    /// as a payload, not as an HTTP failure.
    #[error("File must contain column '{0}'")]
    MissingColumn(String),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("Unknown sentiment: '{0}'. Use: bad, neutral, good, unknown")]
    UnknownSentiment(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for Tonika operations.
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Create a spreadsheet error.
    pub fn spreadsheet(msg: impl Into<String>) -> Self {
        Self::Spreadsheet(msg.into())
    }

    /// Create an inference error.
    pub fn inference(msg: impl Into<String>) -> Self {
        Self::Inference(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether this error is the batch validation failure that callers
    /// receive as an `{"error": ...}` payload.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::MissingColumn(_))
    }
}
