//! Error types for loading research records.

use thiserror::Error;

/// Errors that can occur while decoding or encoding a record.
#[derive(Debug, Error)]
pub enum TypesError {
    /// The document is not a valid aggregate record.
    #[error("record decode failed: {0}")]
    Decode(#[from] serde_json::Error),

    /// A direction value outside -1, 0, +1.
    #[error("invalid direction value: {0}")]
    InvalidDirection(i64),
}

/// Result type for record operations.
pub type TypesResult<T> = Result<T, TypesError>;
