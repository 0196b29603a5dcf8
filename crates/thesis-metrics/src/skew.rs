//! Skew: net balance between constructive and downside hypothesis mass.
//!
//! `skew = constructive − downside` and the 0–100 score is
//! `round(clamp(50 + 50·skew, 0, 100))`. Callers are expected to place every
//! hypothesis in exactly one partition.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::warn;

use thesis_types::{Hypothesis, HypothesisCode, Stance};

// ── Labels ──────────────────────────────────────────────────────────────

/// Directional label derived from the skew score alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkewLabel {
    Constructive,
    LeaningConstructive,
    Balanced,
    LeaningDownside,
    Downside,
}

impl SkewLabel {
    /// Total over every possible score.
    pub fn from_score(score: u8) -> Self {
        match score {
            65.. => Self::Constructive,
            55..=64 => Self::LeaningConstructive,
            45..=54 => Self::Balanced,
            36..=44 => Self::LeaningDownside,
            _ => Self::Downside,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Constructive => "Constructive",
            Self::LeaningConstructive => "Leaning Constructive",
            Self::Balanced => "Balanced",
            Self::LeaningDownside => "Leaning Downside",
            Self::Downside => "Downside",
        }
    }
}

impl std::fmt::Display for SkewLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Which partition had to be backfilled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartitionSide {
    Constructive,
    Downside,
}

// ── Skew ────────────────────────────────────────────────────────────────

/// Skew masses, score and label.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Skew {
    pub constructive_mass: f64,
    pub downside_mass: f64,
    /// `constructive_mass − downside_mass`.
    pub skew: f64,
    /// Integer score in `0..=100`.
    pub score: u8,
    pub label: SkewLabel,
    /// Partitions that arrived empty and were backfilled with one member.
    pub backfilled: Vec<PartitionSide>,
}

/// Map a raw skew onto the 0–100 score.
pub fn skew_score(skew: f64) -> u8 {
    (50.0 + 50.0 * skew).clamp(0.0, 100.0).round() as u8
}

/// Score skew over the given partitions.
///
/// Codes that name no hypothesis are ignored; a code listed twice counts once.
/// An empty partition is a caller error: it is backfilled with a single
/// member so the score stays defined, and the occurrence is logged and
/// reported in [`Skew::backfilled`].
pub fn score_skew(
    hypotheses: &[Hypothesis],
    constructive: &[HypothesisCode],
    downside: &[HypothesisCode],
) -> Skew {
    let mut backfilled = Vec::new();

    let mut constructive: BTreeSet<&HypothesisCode> = constructive.iter().collect();
    let mut downside: BTreeSet<&HypothesisCode> = downside.iter().collect();

    if constructive.is_empty() {
        if let Some(code) = backfill_member(hypotheses, Stance::Bullish, Pick::Strongest) {
            warn!(code = %code, "constructive partition empty, backfilling one member");
            constructive.insert(code);
            backfilled.push(PartitionSide::Constructive);
        }
    }
    if downside.is_empty() {
        if let Some(code) = backfill_member(hypotheses, Stance::Bearish, Pick::Weakest) {
            warn!(code = %code, "downside partition empty, backfilling one member");
            downside.insert(code);
            backfilled.push(PartitionSide::Downside);
        }
    }

    let mass = |codes: &BTreeSet<&HypothesisCode>| -> f64 {
        hypotheses
            .iter()
            .filter(|h| codes.contains(&h.code))
            .map(|h| h.weight)
            .sum()
    };

    let constructive_mass = mass(&constructive);
    let downside_mass = mass(&downside);
    let skew = constructive_mass - downside_mass;
    let score = skew_score(skew);

    Skew {
        constructive_mass,
        downside_mass,
        skew,
        score,
        label: SkewLabel::from_score(score),
        backfilled,
    }
}

enum Pick {
    Strongest,
    Weakest,
}

/// Highest-weighted hypothesis with the given stance; failing that, the
/// strongest or weakest hypothesis overall.
fn backfill_member(hypotheses: &[Hypothesis], stance: Stance, fallback: Pick) -> Option<&HypothesisCode> {
    let by_stance = hypotheses
        .iter()
        .filter(|h| h.stance == stance)
        .max_by(|a, b| a.weight.total_cmp(&b.weight));
    if let Some(h) = by_stance {
        return Some(&h.code);
    }
    let fallback = match fallback {
        Pick::Strongest => hypotheses.iter().max_by(|a, b| a.weight.total_cmp(&b.weight)),
        Pick::Weakest => hypotheses.iter().min_by(|a, b| a.weight.total_cmp(&b.weight)),
    };
    fallback.map(|h| &h.code)
}
