//! The aggregate research record for one subject at one point in time.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::TypesResult;
use crate::evidence::EvidenceItem;
use crate::hypothesis::{Hypothesis, HypothesisCode};
use crate::tripwire::Tripwire;

/// Who the record is about.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectIdentity {
    /// Exchange ticker, e.g. "WOW.AX".
    pub ticker: String,
    /// Company or subject name.
    pub name: String,
    #[serde(default)]
    pub sector: Option<String>,
}

/// Bookkeeping carried alongside the research content.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordMetadata {
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub report_id: Option<String>,
}

/// Complete record: hypotheses, partitions, evidence, tripwires, metadata.
///
/// Expected invariants (checked by the validator, not enforced here): weights
/// sum to about 1.0, every weight is strictly positive, codes are unique and
/// every hypothesis sits in exactly one of `constructive` / `downside`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AggregateRecord {
    pub subject: SubjectIdentity,
    /// Hypotheses in creation order.
    pub hypotheses: Vec<Hypothesis>,
    /// Codes counted as constructive mass for skew.
    #[serde(default)]
    pub constructive: Vec<HypothesisCode>,
    /// Codes counted as downside mass for skew.
    #[serde(default)]
    pub downside: Vec<HypothesisCode>,
    #[serde(default)]
    pub evidence: Vec<EvidenceItem>,
    #[serde(default)]
    pub tripwires: Vec<Tripwire>,
    #[serde(default)]
    pub metadata: RecordMetadata,
}

impl AggregateRecord {
    /// Decode a record from its JSON document form.
    pub fn from_json(json: &str) -> TypesResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Look up a hypothesis by code.
    pub fn hypothesis(&self, code: &HypothesisCode) -> Option<&Hypothesis> {
        self.hypotheses.iter().find(|h| &h.code == code)
    }

    /// Sum of all hypothesis weights.
    pub fn weight_sum(&self) -> f64 {
        self.hypotheses.iter().map(|h| h.weight).sum()
    }

    /// Number of hypotheses.
    pub fn len(&self) -> usize {
        self.hypotheses.len()
    }

    /// Whether the record has no hypotheses.
    pub fn is_empty(&self) -> bool {
        self.hypotheses.is_empty()
    }
}
