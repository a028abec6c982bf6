//! Error types shared across jobview crates

use thiserror::Error;

/// Result type alias for jobview operations
pub type Result<T> = std::result::Result<T, JobviewError>;

/// Main error type for jobview
#[derive(Error, Debug)]
pub enum JobviewError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl JobviewError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}
