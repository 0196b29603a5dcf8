//! Evidence items and their provenance.
//!
//! Every evidence item comes from one of a closed set of domains. The domain
//! says something about how far the source can be trusted, which is why some
//! domains cap the quality rating an item may carry.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::TypesError;
use crate::hypothesis::HypothesisCode;

// ── Domain ──────────────────────────────────────────────────────────────

/// Closed set of evidence domains.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EvidenceDomain {
    Regulatory,
    Economic,
    Academic,
    Competitor,
    Broker,
    Governance,
    Ownership,
    Alternative,
    Corporate,
    Media,
}

impl EvidenceDomain {
    /// All domains, in declaration order.
    pub const ALL: [EvidenceDomain; 10] = [
        Self::Regulatory,
        Self::Economic,
        Self::Academic,
        Self::Competitor,
        Self::Broker,
        Self::Governance,
        Self::Ownership,
        Self::Alternative,
        Self::Corporate,
        Self::Media,
    ];

    /// Default epistemic tag shown next to items from this domain.
    pub fn epistemic_tag(&self) -> EpistemicTag {
        match self {
            Self::Regulatory | Self::Ownership => EpistemicTag::Statutory,
            Self::Competitor | Self::Governance => EpistemicTag::Independent,
            Self::Economic => EpistemicTag::Objective,
            Self::Academic => EpistemicTag::PeerReviewed,
            Self::Broker => EpistemicTag::Consensus,
            Self::Alternative => EpistemicTag::Proprietary,
            Self::Corporate => EpistemicTag::Motivated,
            Self::Media => EpistemicTag::Speculative,
        }
    }
}

impl std::fmt::Display for EvidenceDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Regulatory => "Regulatory",
            Self::Economic => "Economic",
            Self::Academic => "Academic",
            Self::Competitor => "Competitor",
            Self::Broker => "Broker",
            Self::Governance => "Governance",
            Self::Ownership => "Ownership",
            Self::Alternative => "Alternative",
            Self::Corporate => "Corporate",
            Self::Media => "Media",
        };
        write!(f, "{}", name)
    }
}

/// How a source's incentives bear on its reliability. Display only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EpistemicTag {
    Statutory,
    Independent,
    Objective,
    PeerReviewed,
    Consensus,
    Proprietary,
    Motivated,
    Speculative,
}

impl std::fmt::Display for EpistemicTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Statutory => write!(f, "statutory"),
            Self::Independent => write!(f, "independent"),
            Self::Objective => write!(f, "objective"),
            Self::PeerReviewed => write!(f, "peer-reviewed"),
            Self::Consensus => write!(f, "consensus"),
            Self::Proprietary => write!(f, "proprietary"),
            Self::Motivated => write!(f, "motivated"),
            Self::Speculative => write!(f, "speculative"),
        }
    }
}

// ── Quality ─────────────────────────────────────────────────────────────

/// Quality rating of an evidence item. Ordered `Low < Medium < High`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EvidenceQuality {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for EvidenceQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
        }
    }
}

// ── Direction ───────────────────────────────────────────────────────────

/// Directional effect of an item on one hypothesis, carried as -1/0/+1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Direction {
    Contradicts,
    Neutral,
    Supports,
}

impl TryFrom<i64> for Direction {
    type Error = TypesError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Self::Contradicts),
            0 => Ok(Self::Neutral),
            1 => Ok(Self::Supports),
            other => Err(TypesError::InvalidDirection(other)),
        }
    }
}

impl From<Direction> for i64 {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Contradicts => -1,
            Direction::Neutral => 0,
            Direction::Supports => 1,
        }
    }
}

// ── Evidence Item ───────────────────────────────────────────────────────

/// One dated piece of evidence and its effect on each hypothesis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvidenceItem {
    pub id: String,
    pub title: String,
    pub domain: EvidenceDomain,
    pub quality: EvidenceQuality,
    pub date: NaiveDate,
    /// Direction per hypothesis code.
    #[serde(default)]
    pub effects: BTreeMap<HypothesisCode, Direction>,
    /// Optional numeric contribution per hypothesis code.
    #[serde(default)]
    pub contributions: BTreeMap<HypothesisCode, f64>,
    #[serde(default)]
    pub source: String,
    /// Free-text freshness note (e.g. "Q1 FY26").
    #[serde(default)]
    pub freshness: String,
}

impl EvidenceItem {
    /// Hypothesis codes this item references, through effects or contributions.
    pub fn referenced_codes(&self) -> impl Iterator<Item = &HypothesisCode> {
        self.effects.keys().chain(self.contributions.keys())
    }
}
