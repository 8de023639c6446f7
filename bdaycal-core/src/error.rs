//! Error types for bdaycal.

use thiserror::Error;

/// Errors that can occur while converting contacts to a birthday calendar.
#[derive(Error, Debug)]
pub enum BdayCalError {
    #[error("Unrecognized birthday format: {0:?}")]
    UnrecognizedDateFormat(String),

    #[error("vCard parse error on line {line}: {message}")]
    VcardParse { line: usize, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for bdaycal operations.
pub type BdayCalResult<T> = Result<T, BdayCalError>;
