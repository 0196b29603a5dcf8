//! # thesis-metrics
//!
//! Signal engine that turns a set of competing, weighted hypotheses into the
//! verdicts shown on a research page: how concentrated belief is, how
//! confident the distribution is, which way it leans, which hypotheses are
//! rising or falling, and whether the configuration deserves a tension callout.
//!
//! ## Architecture
//!
//! ```text
//!              ┌─────────────────────┐
//!              │  AggregateRecord    │  ← weights written upstream
//!              └─────────┬───────────┘
//!                        ▼
//!              ┌─────────────────────┐
//!              │  sort by weight     │  display order only
//!              └─────────┬───────────┘
//!          ┌─────────────┼──────────────┬───────────────┐
//!          ▼             ▼              ▼               ▼
//!   ┌─────────────┐ ┌───────────┐ ┌───────────┐ ┌──────────────┐
//!   │Concentration│ │Conviction │ │   Skew    │ │   Momentum   │
//!   │ + Dominance │ │ + label   │ │ + label   │ │   status     │
//!   └──────┬──────┘ └─────┬─────┘ └─────┬─────┘ └──────┬───────┘
//!          └──────────────┴──────┬──────┴──────────────┘
//!                                ▼
//!              ┌─────────────────────┐
//!              │  Tension rules      │  ← at most one signal
//!              └─────────┬───────────┘
//!                        ▼
//!              ┌─────────────────────┐
//!              │  SnapshotMetrics    │
//!              └─────────────────────┘
//! ```
//!
//! ## Key Principles
//!
//! - **Pure**: every function reads borrowed input and allocates only its
//!   result. No I/O, no shared state; subjects can be analyzed in parallel.
//! - **Loud preconditions**: an empty hypothesis set is an error, never a
//!   degenerate number.
//! - **Fixed contracts**: thresholds are constants beside the rule using them;
//!   only uncalibrated values live in [`MetricsConfig`].

#![deny(unsafe_code)]

pub mod concentration;
pub mod config;
pub mod conviction;
pub mod engine;
pub mod error;
pub mod momentum;
pub mod skew;
pub mod tension;

/// Slack applied at rule boundaries so weights entered as two-decimal
/// fractions land on the documented side of each threshold.
pub(crate) const FLOAT_TOLERANCE: f64 = 1e-9;

// ── Re-exports ──────────────────────────────────────────────────────────

pub use concentration::{classify_dominance, hhi, Concentration, Dominance};
pub use config::MetricsConfig;
pub use conviction::{conviction, shannon_entropy, ConvictionLabel};
pub use engine::{analyze, sort_by_weight, SignalEngine, SnapshotMetrics};
pub use error::{MetricsError, MetricsResult};
pub use momentum::{Arrow, MomentumStatus, StatusLabel};
pub use skew::{score_skew, skew_score, PartitionSide, Skew, SkewLabel};
pub use tension::{
    transition_proximity, ProximityLabel, SignalColour, TensionInputs, TensionKind,
    TensionSignal,
};
