//! Concentration of belief and the dominance classifier.
//!
//! Concentration is measured with the Herfindahl-Hirschman index (sum of
//! squared weights) and expressed relative to its uniform baseline `1/n`, so a
//! ratio of 1.0 means belief is spread evenly and a ratio of `n` means a
//! single hypothesis holds everything.

use serde::{Deserialize, Serialize};

use crate::error::{MetricsError, MetricsResult};
use crate::FLOAT_TOLERANCE;

/// Gap between the top two weights below which the race reads as Contested.
pub const CONTESTED_GAP: f64 = 0.08;

/// Minimum gap for the leader to be called Dominant.
pub const DOMINANT_GAP: f64 = 0.15;

// ── Dominance ───────────────────────────────────────────────────────────

/// How clearly one hypothesis leads the field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dominance {
    /// Leader holds at least twice its uniform share with a wide gap.
    Dominant,
    /// Top two are within [`CONTESTED_GAP`] of each other.
    Contested,
    /// Near-uniform distribution despite a gap at the top.
    Diffuse,
    /// A leader exists but does not dominate.
    Leading,
}

impl Dominance {
    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Dominant => "Dominant",
            Self::Contested => "Contested",
            Self::Diffuse => "Diffuse",
            Self::Leading => "Leading",
        }
    }
}

impl std::fmt::Display for Dominance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ── Concentration ───────────────────────────────────────────────────────

/// HHI together with its uniform baseline and their ratio.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Concentration {
    /// Σp².
    pub hhi: f64,
    /// `1/n`, the HHI of a uniform distribution.
    pub uniform_baseline: f64,
    /// `hhi / uniform_baseline`.
    pub ratio: f64,
}

/// Herfindahl-Hirschman index of a weight list.
pub fn hhi(weights: &[f64]) -> f64 {
    weights.iter().map(|p| p * p).sum()
}

/// HHI of a uniform distribution over `n` hypotheses.
pub fn uniform_baseline(n: usize) -> MetricsResult<f64> {
    if n == 0 {
        return Err(MetricsError::EmptyHypothesisSet);
    }
    Ok(1.0 / n as f64)
}

/// Compute HHI, baseline and concentration ratio.
pub fn measure(weights: &[f64]) -> MetricsResult<Concentration> {
    let uniform_baseline = uniform_baseline(weights.len())?;
    let hhi = hhi(weights);
    Ok(Concentration {
        hhi,
        uniform_baseline,
        ratio: hhi / uniform_baseline,
    })
}

/// Classify dominance from the top two weights.
///
/// Rules are evaluated in order and the first match wins:
/// 1. gap below [`CONTESTED_GAP`] → Contested
/// 2. ratio below `diffuse_threshold` (when configured) → Diffuse
/// 3. `p1 ≥ 2/n` and gap at least [`DOMINANT_GAP`] → Dominant
/// 4. otherwise → Leading
///
/// `p2` is 0.0 when there is only one hypothesis.
pub fn classify_dominance(
    p1: f64,
    p2: f64,
    n: usize,
    ratio: f64,
    diffuse_threshold: Option<f64>,
) -> MetricsResult<Dominance> {
    if n == 0 {
        return Err(MetricsError::EmptyHypothesisSet);
    }
    let gap = p1 - p2;

    if gap < CONTESTED_GAP - FLOAT_TOLERANCE {
        return Ok(Dominance::Contested);
    }

    if let Some(threshold) = diffuse_threshold {
        if ratio < threshold {
            return Ok(Dominance::Diffuse);
        }
    }

    let majority_bar = 2.0 / n as f64;
    if p1 >= majority_bar - FLOAT_TOLERANCE && gap >= DOMINANT_GAP - FLOAT_TOLERANCE {
        return Ok(Dominance::Dominant);
    }

    Ok(Dominance::Leading)
}
