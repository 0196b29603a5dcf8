//! Competing hypotheses and their weights.
//!
//! A hypothesis is one explanation for how a subject is behaving. Its code is
//! permanent: display order is re-sorted by weight every cycle, but the code
//! and the stored creation order never change.

use serde::{Deserialize, Serialize};

// ── Identifier Types ────────────────────────────────────────────────────

/// Permanent identity of a hypothesis within a record (e.g. `H1`).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HypothesisCode(pub String);

impl HypothesisCode {
    /// Create a code from anything string-like.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Borrow the raw code.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for HypothesisCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for HypothesisCode {
    fn from(code: &str) -> Self {
        Self(code.to_string())
    }
}

// ── Stance ──────────────────────────────────────────────────────────────

/// Which way a hypothesis points for the subject.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Stance {
    Bullish,
    Neutral,
    Bearish,
}

impl std::fmt::Display for Stance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bullish => write!(f, "BULLISH"),
            Self::Neutral => write!(f, "NEUTRAL"),
            Self::Bearish => write!(f, "BEARISH"),
        }
    }
}

// ── Hypothesis ──────────────────────────────────────────────────────────

/// One competing explanation with its current probability-like weight.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hypothesis {
    /// Permanent code, never reassigned.
    pub code: HypothesisCode,
    /// Display name (e.g. "Managed Turnaround").
    pub name: String,
    /// Directional stance.
    pub stance: Stance,
    /// Current weight, written by the upstream evidence engine.
    pub weight: f64,
    /// Weight at the prior snapshot. `None` means treat the prior as uniform.
    #[serde(default)]
    pub prior_weight: Option<f64>,
    /// Short label for badges.
    #[serde(default)]
    pub label: String,
    /// Preconditions that must hold for this hypothesis to play out.
    #[serde(default)]
    pub requires: Vec<String>,
    /// References to supporting evidence.
    #[serde(default)]
    pub supporting: Vec<String>,
    /// References to contradicting evidence.
    #[serde(default)]
    pub contradicting: Vec<String>,
}

impl Hypothesis {
    /// Minimal hypothesis with empty narrative fields.
    pub fn new(code: impl Into<String>, name: impl Into<String>, stance: Stance, weight: f64) -> Self {
        Self {
            code: HypothesisCode::new(code),
            name: name.into(),
            stance,
            weight,
            prior_weight: None,
            label: String::new(),
            requires: Vec::new(),
            supporting: Vec::new(),
            contradicting: Vec::new(),
        }
    }

    /// Builder-style setter for the prior snapshot weight.
    pub fn with_prior(mut self, prior: f64) -> Self {
        self.prior_weight = Some(prior);
        self
    }

    /// Prior weight, falling back to the uniform share `1/n`.
    pub fn effective_prior(&self, n: usize) -> f64 {
        self.prior_weight.unwrap_or(1.0 / n.max(1) as f64)
    }
}
