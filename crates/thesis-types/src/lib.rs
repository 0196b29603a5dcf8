//! # thesis-types
//!
//! Data model for a single research snapshot: the competing hypotheses about a
//! subject, the evidence that moved their weights, and the tripwires that will
//! confirm or break them.
//!
//! ## Ownership
//!
//! ```text
//!   AggregateRecord
//!   ├── SubjectIdentity
//!   ├── Vec<Hypothesis>          ← weights written upstream, read-only here
//!   ├── constructive / downside  ← partitions of hypothesis codes
//!   ├── Vec<EvidenceItem>
//!   ├── Vec<Tripwire>
//!   └── RecordMetadata
//! ```
//!
//! The record is a strict ownership tree. Downstream crates borrow it and
//! return their own derived results; nothing here is mutated after load.

#![deny(unsafe_code)]

pub mod error;
pub mod evidence;
pub mod hypothesis;
pub mod record;
pub mod tripwire;

// ── Re-exports ──────────────────────────────────────────────────────────

pub use error::{TypesError, TypesResult};
pub use evidence::{Direction, EpistemicTag, EvidenceDomain, EvidenceItem, EvidenceQuality};
pub use hypothesis::{Hypothesis, HypothesisCode, Stance};
pub use record::{AggregateRecord, RecordMetadata, SubjectIdentity};
pub use tripwire::{ProximityState, Tripwire, TripwireCondition};
