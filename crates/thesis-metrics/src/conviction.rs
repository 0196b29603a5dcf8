//! Conviction: entropy-normalised certainty of a weight distribution.
//!
//! `conviction = 1 − H/ln(n)` with `H = −Σ p·ln p`. A uniform distribution
//! scores exactly 0, a single certainty approaches 1.

use serde::{Deserialize, Serialize};

use crate::error::{MetricsError, MetricsResult};

/// Below this, the distribution carries almost no information.
pub const UNINFORMATIVE_BELOW: f64 = 0.05;
/// Upper bound of the Low bucket.
pub const LOW_BELOW: f64 = 0.15;
/// Upper bound of the Moderate bucket; at or above is High.
pub const MODERATE_BELOW: f64 = 0.35;

/// Conviction bucket. Boundary values fall into the higher bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConvictionLabel {
    Uninformative,
    Low,
    Moderate,
    High,
}

impl ConvictionLabel {
    /// Bucket a conviction value.
    pub fn from_value(conviction: f64) -> Self {
        if conviction < UNINFORMATIVE_BELOW {
            Self::Uninformative
        } else if conviction < LOW_BELOW {
            Self::Low
        } else if conviction < MODERATE_BELOW {
            Self::Moderate
        } else {
            Self::High
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Uninformative => "Uninformative",
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
        }
    }
}

impl std::fmt::Display for ConvictionLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Shannon entropy in nats. Zero and negative weights contribute nothing.
pub fn shannon_entropy(weights: &[f64]) -> f64 {
    weights
        .iter()
        .filter(|p| **p > 0.0)
        .map(|p| -p * p.ln())
        .sum()
}

/// Conviction of a weight distribution.
///
/// A single hypothesis is trivially uniform, so it scores 0.
pub fn conviction(weights: &[f64]) -> MetricsResult<f64> {
    let n = weights.len();
    if n == 0 {
        return Err(MetricsError::EmptyHypothesisSet);
    }
    if n == 1 {
        return Ok(0.0);
    }

    let h_max = (n as f64).ln();
    let value = 1.0 - shannon_entropy(weights) / h_max;

    // Snap rounding noise so a uniform distribution reads as exactly zero.
    if value.abs() < 1e-12 {
        return Ok(0.0);
    }
    Ok(value.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_is_exactly_zero() {
        assert_eq!(conviction(&[0.25, 0.25, 0.25, 0.25]).unwrap(), 0.0);
        assert_eq!(conviction(&[0.2; 5]).unwrap(), 0.0);
        assert_eq!(conviction(&[1.0 / 3.0; 3]).unwrap(), 0.0);
    }

    #[test]
    fn near_certainty_is_high() {
        let c = conviction(&[0.97, 0.01, 0.01, 0.01]).unwrap();
        assert!(c > 0.60, "got {}", c);
        assert_eq!(ConvictionLabel::from_value(c), ConvictionLabel::High);
    }

    #[test]
    fn literal_formula_on_moderate_case() {
        let c = conviction(&[0.55, 0.20, 0.15, 0.10]).unwrap();
        let h = -(0.55f64 * 0.55f64.ln()
            + 0.20f64 * 0.20f64.ln()
            + 0.15f64 * 0.15f64.ln()
            + 0.10f64 * 0.10f64.ln());
        let expected = 1.0 - h / 4.0f64.ln();
        assert!((c - expected).abs() < 1e-12);
    }

    #[test]
    fn zero_weights_are_skipped() {
        let c = conviction(&[1.0, 0.0, 0.0]).unwrap();
        assert!((c - 1.0).abs() < 1e-12);
    }

    #[test]
    fn single_hypothesis_scores_zero() {
        assert_eq!(conviction(&[1.0]).unwrap(), 0.0);
    }

    #[test]
    fn empty_is_an_error() {
        assert!(matches!(conviction(&[]), Err(MetricsError::EmptyHypothesisSet)));
    }

    #[test]
    fn label_boundaries_go_up() {
        assert_eq!(ConvictionLabel::from_value(0.0), ConvictionLabel::Uninformative);
        assert_eq!(ConvictionLabel::from_value(0.0499), ConvictionLabel::Uninformative);
        assert_eq!(ConvictionLabel::from_value(0.05), ConvictionLabel::Low);
        assert_eq!(ConvictionLabel::from_value(0.15), ConvictionLabel::Moderate);
        assert_eq!(ConvictionLabel::from_value(0.3499), ConvictionLabel::Moderate);
        assert_eq!(ConvictionLabel::from_value(0.35), ConvictionLabel::High);
    }
}
