//! Tension rule engine.
//!
//! Flags at most one analytically risky configuration per snapshot. Rules are
//! checked in strict priority order and the first match wins:
//!
//! | # | Condition | Signal |
//! |---|-----------|--------|
//! | 1 | lead ≥ 0.30 and Contested | CONTESTED LEAD (amber) |
//! | 2 | lead rising and transition proximity > 0.60 | FRAGILE MOMENTUM (amber) |
//! | 3 | bearish lead and Leading | BEAR REGIME (red) |
//! | 4 | conviction < 0.05 and some weight moved > 0.05 from its prior | RAPID SHIFT, LOW CONVICTION (amber) |
//! | 5 | Dominant and conviction > 0.35 | CLEAR SIGNAL (green) |

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use thesis_types::{Hypothesis, HypothesisCode, Stance};

use crate::concentration::{Dominance, DOMINANT_GAP};
use crate::momentum::{Arrow, MomentumStatus};
use crate::FLOAT_TOLERANCE;

/// Minimum lead weight for a contested race to be flagged.
pub const CONTESTED_LEAD_FLOOR: f64 = 0.30;
/// Transition proximity above which a rising lead is fragile.
pub const FRAGILE_PROXIMITY: f64 = 0.60;
/// Conviction below which large moves count as a rapid shift.
pub const RAPID_SHIFT_CONVICTION: f64 = 0.05;
/// Minimum absolute move from prior for a rapid shift.
pub const RAPID_SHIFT_MOVE: f64 = 0.05;
/// Conviction above which a dominant lead is a clear signal.
pub const CLEAR_SIGNAL_CONVICTION: f64 = 0.35;

// ── Transition Proximity ────────────────────────────────────────────────

/// How close the runner-up is to taking the lead: `clamp(1 − gap/0.15, 0, 1)`.
pub fn transition_proximity(gap: f64) -> f64 {
    (1.0 - gap / DOMINANT_GAP).clamp(0.0, 1.0)
}

/// Bucketed transition proximity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProximityLabel {
    /// Below 0.30.
    Remote,
    /// 0.30 up to and including 0.60.
    Building,
    /// Above 0.60, the same bar rule 2 uses.
    Imminent,
}

impl ProximityLabel {
    pub fn from_value(proximity: f64) -> Self {
        if proximity > FRAGILE_PROXIMITY + FLOAT_TOLERANCE {
            Self::Imminent
        } else if proximity >= 0.30 - FLOAT_TOLERANCE {
            Self::Building
        } else {
            Self::Remote
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Remote => "Remote",
            Self::Building => "Building",
            Self::Imminent => "Imminent",
        }
    }
}

impl std::fmt::Display for ProximityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ── Signal Types ────────────────────────────────────────────────────────

/// Badge colour of a tension signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalColour {
    Amber,
    Red,
    Green,
}

impl std::fmt::Display for SignalColour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Amber => write!(f, "amber"),
            Self::Red => write!(f, "red"),
            Self::Green => write!(f, "green"),
        }
    }
}

/// Which rule fired.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TensionKind {
    ContestedLead,
    FragileMomentum,
    BearRegime,
    RapidShiftLowConviction,
    ClearSignal,
}

impl TensionKind {
    /// Rule number, 1 is highest priority.
    pub fn priority(&self) -> u8 {
        match self {
            Self::ContestedLead => 1,
            Self::FragileMomentum => 2,
            Self::BearRegime => 3,
            Self::RapidShiftLowConviction => 4,
            Self::ClearSignal => 5,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::ContestedLead => "CONTESTED LEAD",
            Self::FragileMomentum => "FRAGILE MOMENTUM",
            Self::BearRegime => "BEAR REGIME",
            Self::RapidShiftLowConviction => "RAPID SHIFT, LOW CONVICTION",
            Self::ClearSignal => "CLEAR SIGNAL",
        }
    }

    pub fn colour(&self) -> SignalColour {
        match self {
            Self::BearRegime => SignalColour::Red,
            Self::ClearSignal => SignalColour::Green,
            _ => SignalColour::Amber,
        }
    }
}

/// The single surfaced tension callout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TensionSignal {
    pub kind: TensionKind,
    /// Rule number that fired.
    pub priority: u8,
    pub label: String,
    pub colour: SignalColour,
    pub message: String,
}

impl TensionSignal {
    fn new(kind: TensionKind, message: String) -> Self {
        Self {
            kind,
            priority: kind.priority(),
            label: kind.label().to_string(),
            colour: kind.colour(),
            message,
        }
    }
}

// ── Rule Engine ─────────────────────────────────────────────────────────

/// Everything the rules look at.
#[derive(Clone, Debug)]
pub struct TensionInputs<'a> {
    /// Hypotheses in weight-descending order.
    pub hypotheses: &'a [Hypothesis],
    pub dominance: Dominance,
    pub conviction: f64,
    /// Caller-supplied, in `[0, 1]`.
    pub transition_proximity: f64,
    pub statuses: &'a BTreeMap<HypothesisCode, MomentumStatus>,
    pub n: usize,
}

/// Evaluate the rules. Returns `None` for an empty set or when nothing fires.
pub fn evaluate(inputs: &TensionInputs<'_>) -> Option<TensionSignal> {
    let lead = inputs.hypotheses.first()?;
    let runner_up = inputs.hypotheses.get(1);

    if lead.weight >= CONTESTED_LEAD_FLOOR - FLOAT_TOLERANCE
        && inputs.dominance == Dominance::Contested
    {
        let gap = lead.weight - runner_up.map(|h| h.weight).unwrap_or(0.0);
        let challenger = runner_up
            .map(|h| h.code.to_string())
            .unwrap_or_else(|| "the field".to_string());
        return Some(TensionSignal::new(
            TensionKind::ContestedLead,
            format!(
                "{} leads at {:.0}% but {} trails by only {:.0} pts",
                lead.code,
                lead.weight * 100.0,
                challenger,
                gap * 100.0
            ),
        ));
    }

    let lead_rising = inputs
        .statuses
        .get(&lead.code)
        .map(|s| s.arrow == Arrow::Up)
        .unwrap_or(false);
    if lead_rising && inputs.transition_proximity > FRAGILE_PROXIMITY + FLOAT_TOLERANCE {
        return Some(TensionSignal::new(
            TensionKind::FragileMomentum,
            format!(
                "{} is rising but its lead is thin (transition proximity {:.2})",
                lead.code, inputs.transition_proximity
            ),
        ));
    }

    if lead.stance == Stance::Bearish && inputs.dominance == Dominance::Leading {
        return Some(TensionSignal::new(
            TensionKind::BearRegime,
            format!(
                "Bearish {} ({}) leads the field at {:.0}%",
                lead.code,
                lead.name,
                lead.weight * 100.0
            ),
        ));
    }

    if inputs.conviction < RAPID_SHIFT_CONVICTION {
        if let Some((code, shift)) = largest_shift(inputs.hypotheses, inputs.n) {
            if shift > RAPID_SHIFT_MOVE + FLOAT_TOLERANCE {
                return Some(TensionSignal::new(
                    TensionKind::RapidShiftLowConviction,
                    format!(
                        "{} moved {:.0} pts while conviction is only {:.2}",
                        code,
                        shift * 100.0,
                        inputs.conviction
                    ),
                ));
            }
        }
    }

    if inputs.dominance == Dominance::Dominant && inputs.conviction > CLEAR_SIGNAL_CONVICTION {
        return Some(TensionSignal::new(
            TensionKind::ClearSignal,
            format!(
                "{} dominates at {:.0}% with conviction {:.2}",
                lead.code,
                lead.weight * 100.0,
                inputs.conviction
            ),
        ));
    }

    None
}

/// Hypothesis with the largest |weight − effective prior|.
fn largest_shift(hypotheses: &[Hypothesis], n: usize) -> Option<(&HypothesisCode, f64)> {
    hypotheses
        .iter()
        .map(|h| (&h.code, (h.weight - h.effective_prior(n)).abs()))
        .max_by(|a, b| a.1.total_cmp(&b.1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::momentum::status_map;

    fn run(
        hypotheses: &[Hypothesis],
        dominance: Dominance,
        conviction: f64,
        proximity: f64,
    ) -> Option<TensionSignal> {
        let statuses = status_map(hypotheses);
        evaluate(&TensionInputs {
            hypotheses,
            dominance,
            conviction,
            transition_proximity: proximity,
            statuses: &statuses,
            n: hypotheses.len(),
        })
    }

    #[test]
    fn reference_contested_lead() {
        let hyps = vec![
            Hypothesis::new("H1", "Turnaround", Stance::Bullish, 0.34),
            Hypothesis::new("H2", "Erosion", Stance::Bearish, 0.30),
            Hypothesis::new("H3", "Squeeze", Stance::Bearish, 0.21),
            Hypothesis::new("H4", "Disruption", Stance::Bearish, 0.15),
        ];
        let signal = run(&hyps, Dominance::Contested, 0.02, 0.73).unwrap();
        assert_eq!(signal.kind, TensionKind::ContestedLead);
        assert_eq!(signal.label, "CONTESTED LEAD");
        assert_eq!(signal.colour, SignalColour::Amber);
        assert!(signal.message.contains("H1"));
    }

    #[test]
    fn no_rule_matches() {
        let hyps = vec![
            Hypothesis::new("H1", "A", Stance::Bullish, 0.40).with_prior(0.40),
            Hypothesis::new("H2", "B", Stance::Bearish, 0.30).with_prior(0.30),
            Hypothesis::new("H3", "C", Stance::Neutral, 0.30).with_prior(0.30),
        ];
        assert!(run(&hyps, Dominance::Leading, 0.02, 0.33).is_none());
    }

    #[test]
    fn fragile_momentum() {
        let hyps = vec![
            Hypothesis::new("H1", "A", Stance::Bullish, 0.36).with_prior(0.25),
            Hypothesis::new("H2", "B", Stance::Bearish, 0.27).with_prior(0.25),
            Hypothesis::new("H3", "C", Stance::Bearish, 0.22).with_prior(0.25),
            Hypothesis::new("H4", "D", Stance::Bearish, 0.15).with_prior(0.25),
        ];
        // gap 0.09 → not contested; proximity 0.4 is too low
        assert_ne!(
            run(&hyps, Dominance::Leading, 0.05, 0.40).map(|s| s.kind),
            Some(TensionKind::FragileMomentum)
        );
        let signal = run(&hyps, Dominance::Leading, 0.05, 0.65).unwrap();
        assert_eq!(signal.kind, TensionKind::FragileMomentum);
    }

    #[test]
    fn bear_regime_is_red() {
        let hyps = vec![
            Hypothesis::new("H2", "Erosion", Stance::Bearish, 0.45).with_prior(0.45),
            Hypothesis::new("H1", "Turnaround", Stance::Bullish, 0.33).with_prior(0.33),
            Hypothesis::new("H3", "Squeeze", Stance::Bearish, 0.22).with_prior(0.22),
        ];
        let signal = run(&hyps, Dominance::Leading, 0.10, 0.20).unwrap();
        assert_eq!(signal.kind, TensionKind::BearRegime);
        assert_eq!(signal.colour, SignalColour::Red);
    }

    #[test]
    fn rapid_shift_low_conviction() {
        let hyps = vec![
            Hypothesis::new("H1", "A", Stance::Bullish, 0.29).with_prior(0.20),
            Hypothesis::new("H2", "B", Stance::Bullish, 0.25).with_prior(0.25),
            Hypothesis::new("H3", "C", Stance::Bearish, 0.24).with_prior(0.25),
            Hypothesis::new("H4", "D", Stance::Bearish, 0.22).with_prior(0.30),
        ];
        let signal = run(&hyps, Dominance::Contested, 0.004, 0.0).unwrap();
        assert_eq!(signal.kind, TensionKind::RapidShiftLowConviction);
        assert!(signal.message.contains("H1"));
    }

    #[test]
    fn clear_signal_is_green() {
        let hyps = vec![
            Hypothesis::new("H1", "A", Stance::Bullish, 0.70).with_prior(0.70),
            Hypothesis::new("H2", "B", Stance::Bearish, 0.20).with_prior(0.20),
            Hypothesis::new("H3", "C", Stance::Bearish, 0.10).with_prior(0.10),
        ];
        let signal = run(&hyps, Dominance::Dominant, 0.45, 0.0).unwrap();
        assert_eq!(signal.kind, TensionKind::ClearSignal);
        assert_eq!(signal.colour, SignalColour::Green);
    }

    #[test]
    fn contested_lead_outranks_later_rules() {
        // Bearish, rising, contested lead: rule 1 still wins.
        let hyps = vec![
            Hypothesis::new("H2", "Erosion", Stance::Bearish, 0.36).with_prior(0.20),
            Hypothesis::new("H1", "Turnaround", Stance::Bullish, 0.32).with_prior(0.40),
            Hypothesis::new("H3", "Squeeze", Stance::Bearish, 0.32).with_prior(0.40),
        ];
        let signal = run(&hyps, Dominance::Contested, 0.01, 0.73).unwrap();
        assert_eq!(signal.kind, TensionKind::ContestedLead);
    }

    #[test]
    fn proximity_formula_and_labels() {
        assert!((transition_proximity(0.04) - (1.0 - 0.04 / 0.15)).abs() < 1e-12);
        assert_eq!(transition_proximity(0.30), 0.0);
        assert_eq!(transition_proximity(-0.1), 1.0);
        assert_eq!(ProximityLabel::from_value(0.0), ProximityLabel::Remote);
        assert_eq!(ProximityLabel::from_value(transition_proximity(0.06)), ProximityLabel::Building);
        assert_eq!(ProximityLabel::from_value(0.61), ProximityLabel::Imminent);
    }

    #[test]
    fn empty_set_yields_nothing() {
        assert!(run(&[], Dominance::Leading, 0.0, 0.0).is_none());
    }

    #[test]
    fn kinds_have_distinct_priorities() {
        let kinds = [
            TensionKind::ContestedLead,
            TensionKind::FragileMomentum,
            TensionKind::BearRegime,
            TensionKind::RapidShiftLowConviction,
            TensionKind::ClearSignal,
        ];
        let priorities: Vec<u8> = kinds.iter().map(|k| k.priority()).collect();
        assert_eq!(priorities, vec![1, 2, 3, 4, 5]);
    }
}
