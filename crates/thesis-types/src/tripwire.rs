//! Tripwires: pre-declared monitoring conditions with a good and a bad outcome.

use serde::{Deserialize, Serialize};

/// How close the current reading sits to the tripwire's threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProximityState {
    Clear,
    Approaching,
    AtThreshold,
    Breached,
}

impl std::fmt::Display for ProximityState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Clear => write!(f, "CLEAR"),
            Self::Approaching => write!(f, "APPROACHING"),
            Self::AtThreshold => write!(f, "AT_THRESHOLD"),
            Self::Breached => write!(f, "BREACHED"),
        }
    }
}

/// A condition and what it would mean for the hypotheses if it occurs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripwireCondition {
    /// The observable condition (e.g. "AU Food EBIT growth ≥8%").
    pub condition: String,
    /// Its effect on the hypothesis set.
    pub effect: String,
}

/// A monitoring condition with a good/bad outcome pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tripwire {
    pub id: String,
    /// When it resolves (e.g. "25 FEB 2026", "ONGOING").
    pub timeframe: String,
    pub title: String,
    pub good: TripwireCondition,
    pub bad: TripwireCondition,
    /// How often it is checked.
    #[serde(default)]
    pub cadence: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub current_reading: Option<String>,
    #[serde(default)]
    pub proximity: Option<ProximityState>,
}
