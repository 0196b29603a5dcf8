//! # thesis-validator
//!
//! Pre-flight structural checks for aggregate research records. The
//! validator reads the same record the signal engine does but never depends
//! on it; a caller typically runs it first and decides what to do with the
//! findings.
//!
//! ## Rules
//!
//! | Rule | Finding |
//! |------|---------|
//! | Weights sum to 1.0 within tolerance | `Weight sum ...` |
//! | Every weight strictly positive | `... non-positive ...` per offender |
//! | Evidence quality within its domain ceiling | `... ceiling ...` per item |
//! | At least the minimum number of tripwires | `... tripwire ...` |
//! | Hypothesis codes unique | `... appears N times` |
//! | Partitions name known hypotheses, each exactly once | per code |
//! | Evidence references known hypotheses | per item and code |
//!
//! All rules run on every call. An empty result means the record is ready
//! for analysis.

#![deny(unsafe_code)]

pub mod config;
pub mod credibility;
pub mod error;
pub mod validator;

/// Slack applied at rule boundaries so weights entered as two-decimal
/// fractions land on the documented side of each threshold.
pub(crate) const FLOAT_TOLERANCE: f64 = 1e-9;

pub use config::{CeilingRule, ValidatorConfig};
pub use credibility::{CredibilityPolicy, CORPORATE_CEILING};
pub use error::{ValidatorError, ValidatorResult};
pub use validator::{validate, IssueKind, ValidationIssue, ValidationReport, Validator};
