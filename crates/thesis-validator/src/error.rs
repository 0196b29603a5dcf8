//! Error types for the validator.
//!
//! Rule violations found in a record are not errors; they are returned as a
//! list of messages. Only a broken validator configuration fails.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidatorError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Result type for validator setup.
pub type ValidatorResult<T> = Result<T, ValidatorError>;
