//! Error types for the signal engine.

use thiserror::Error;

/// Errors raised when a caller violates an engine precondition.
///
/// Structural problems with a record (bad weight sum, missing tripwires) are
/// not errors here; they are reported as data by `thesis-validator`.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// The hypothesis set is empty, so no metric is defined.
    #[error("hypothesis set is empty")]
    EmptyHypothesisSet,

    /// A weight is NaN or infinite.
    #[error("non-finite weight for hypothesis {code}: {weight}")]
    NonFiniteWeight { code: String, weight: f64 },

    /// Two hypotheses share a code, so per-code results would collide.
    #[error("duplicate hypothesis code {code}")]
    DuplicateCode { code: String },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Result type for signal engine operations.
pub type MetricsResult<T> = Result<T, MetricsError>;
