//! Per-hypothesis momentum status.
//!
//! Compares each weight with its prior snapshot (uniform `1/n` when unknown)
//! and turns the move into an arrow plus a short status label.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use thesis_types::{Hypothesis, HypothesisCode, Stance};

use crate::FLOAT_TOLERANCE;

/// Moves within ±this band read as flat.
pub const MOMENTUM_BAND: f64 = 0.03;

/// Direction of the move since the prior snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Arrow {
    Up,
    Down,
    Flat,
}

impl Arrow {
    /// Classify a weight delta.
    pub fn from_delta(delta: f64) -> Self {
        if delta > MOMENTUM_BAND + FLOAT_TOLERANCE {
            Self::Up
        } else if delta < -MOMENTUM_BAND - FLOAT_TOLERANCE {
            Self::Down
        } else {
            Self::Flat
        }
    }
}

impl std::fmt::Display for Arrow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Up => write!(f, "UP"),
            Self::Down => write!(f, "DOWN"),
            Self::Flat => write!(f, "FLAT"),
        }
    }
}

/// Status label shown next to a hypothesis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusLabel {
    Building,
    Strengthening,
    Fading,
    Priced,
    Watching,
    Stable,
}

impl StatusLabel {
    /// Lookup over (arrow, leadership, stance). Unlisted combinations are Stable.
    pub fn lookup(arrow: Arrow, is_lead: bool, stance: Stance) -> Self {
        match (arrow, is_lead, stance) {
            (Arrow::Up, true, Stance::Bullish) => Self::Building,
            (Arrow::Up, true, Stance::Bearish) => Self::Strengthening,
            (Arrow::Down, false, Stance::Bearish) => Self::Fading,
            (Arrow::Flat, true, Stance::Neutral) => Self::Priced,
            (Arrow::Flat, false, Stance::Bearish) => Self::Watching,
            _ => Self::Stable,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Building => "Building",
            Self::Strengthening => "Strengthening",
            Self::Fading => "Fading",
            Self::Priced => "Priced",
            Self::Watching => "Watching",
            Self::Stable => "Stable",
        }
    }
}

impl std::fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Momentum of one hypothesis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MomentumStatus {
    pub arrow: Arrow,
    pub label: StatusLabel,
    /// `weight − effective prior`.
    pub delta: f64,
}

/// Classify a single hypothesis out of `n`.
pub fn classify(hypothesis: &Hypothesis, n: usize, is_lead: bool) -> MomentumStatus {
    let delta = hypothesis.weight - hypothesis.effective_prior(n);
    let arrow = Arrow::from_delta(delta);
    MomentumStatus {
        arrow,
        label: StatusLabel::lookup(arrow, is_lead, hypothesis.stance),
        delta,
    }
}

/// Status for every hypothesis, keyed by code.
///
/// `sorted` must be in weight-descending order; its first entry is the lead.
pub fn status_map(sorted: &[Hypothesis]) -> BTreeMap<HypothesisCode, MomentumStatus> {
    let n = sorted.len();
    sorted
        .iter()
        .enumerate()
        .map(|(i, h)| (h.code.clone(), classify(h, n, i == 0)))
        .collect()
}
