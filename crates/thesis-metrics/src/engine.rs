//! Snapshot orchestrator.
//!
//! The `SignalEngine` composes the leaf metrics into one derived result:
//! sort → concentration → dominance → conviction → skew → transition
//! proximity → momentum status → tension.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use thesis_types::{AggregateRecord, Hypothesis, HypothesisCode};

use crate::concentration::{self, Dominance};
use crate::config::MetricsConfig;
use crate::conviction::{self, ConvictionLabel};
use crate::error::{MetricsError, MetricsResult};
use crate::momentum::{self, MomentumStatus};
use crate::skew::{self, PartitionSide, SkewLabel};
use crate::tension::{self, ProximityLabel, TensionInputs, TensionSignal};

// ── Snapshot Metrics ────────────────────────────────────────────────────

/// Everything derived from one record. The input record is never modified.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnapshotMetrics {
    /// Subject ticker the metrics belong to.
    pub ticker: String,
    /// Hypotheses in display order (weight descending, ties in creation order).
    pub hypotheses: Vec<Hypothesis>,
    /// `p1 − p2`.
    pub gap: f64,
    /// `p1 / p2`, absent when there is no runner-up or it has zero weight.
    pub ratio: Option<f64>,
    pub hhi: f64,
    pub uniform_baseline: f64,
    pub concentration_ratio: f64,
    pub dominance: Dominance,
    pub conviction: f64,
    pub conviction_label: ConvictionLabel,
    pub constructive_mass: f64,
    pub downside_mass: f64,
    pub skew: f64,
    pub skew_score: u8,
    pub skew_label: SkewLabel,
    pub transition_proximity: f64,
    pub transition_label: ProximityLabel,
    pub statuses: BTreeMap<HypothesisCode, MomentumStatus>,
    pub tension: Option<TensionSignal>,
    /// Skew partitions that had to be backfilled. Non-empty means the record
    /// arrived with an empty partition.
    pub backfilled_partitions: Vec<PartitionSide>,
}

impl SnapshotMetrics {
    /// The leading hypothesis.
    pub fn lead(&self) -> Option<&Hypothesis> {
        self.hypotheses.first()
    }
}

// ── Signal Engine ───────────────────────────────────────────────────────

/// Stateless engine; holds only configuration, so one instance can serve
/// any number of subjects concurrently.
#[derive(Clone, Debug, Default)]
pub struct SignalEngine {
    config: MetricsConfig,
}

impl SignalEngine {
    /// Create an engine after validating its configuration.
    pub fn new(config: MetricsConfig) -> MetricsResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration.
    pub fn config(&self) -> &MetricsConfig {
        &self.config
    }

    /// Compute every metric for one record.
    ///
    /// Fails only on precondition violations: an empty hypothesis set, a
    /// non-finite weight or a repeated hypothesis code.
    pub fn analyze(&self, record: &AggregateRecord) -> MetricsResult<SnapshotMetrics> {
        if record.hypotheses.is_empty() {
            return Err(MetricsError::EmptyHypothesisSet);
        }
        if let Some(h) = record.hypotheses.iter().find(|h| !h.weight.is_finite()) {
            return Err(MetricsError::NonFiniteWeight {
                code: h.code.to_string(),
                weight: h.weight,
            });
        }
        let mut codes = BTreeSet::new();
        if let Some(h) = record.hypotheses.iter().find(|h| !codes.insert(&h.code)) {
            return Err(MetricsError::DuplicateCode {
                code: h.code.to_string(),
            });
        }

        let sorted = sort_by_weight(&record.hypotheses);
        let n = sorted.len();
        let weights: Vec<f64> = sorted.iter().map(|h| h.weight).collect();

        let p1 = weights[0];
        let p2 = weights.get(1).copied().unwrap_or(0.0);
        let gap = p1 - p2;
        let ratio = (p2 > 0.0).then(|| p1 / p2);

        let concentration = concentration::measure(&weights)?;
        let dominance = concentration::classify_dominance(
            p1,
            p2,
            n,
            concentration.ratio,
            self.config.diffuse_ratio_threshold,
        )?;

        let conviction = conviction::conviction(&weights)?;
        let skew = skew::score_skew(&sorted, &record.constructive, &record.downside);
        let transition_proximity = tension::transition_proximity(gap);
        let statuses = momentum::status_map(&sorted);

        let tension = tension::evaluate(&TensionInputs {
            hypotheses: &sorted,
            dominance,
            conviction,
            transition_proximity,
            statuses: &statuses,
            n,
        });

        debug!(
            ticker = %record.subject.ticker,
            n,
            gap,
            hhi = concentration.hhi,
            dominance = %dominance,
            conviction,
            skew_score = skew.score,
            tension = tension.as_ref().map(|t| t.label.as_str()).unwrap_or("none"),
            "snapshot analyzed"
        );

        Ok(SnapshotMetrics {
            ticker: record.subject.ticker.clone(),
            hypotheses: sorted,
            gap,
            ratio,
            hhi: concentration.hhi,
            uniform_baseline: concentration.uniform_baseline,
            concentration_ratio: concentration.ratio,
            dominance,
            conviction,
            conviction_label: ConvictionLabel::from_value(conviction),
            constructive_mass: skew.constructive_mass,
            downside_mass: skew.downside_mass,
            skew: skew.skew,
            skew_score: skew.score,
            skew_label: skew.label,
            transition_proximity,
            transition_label: ProximityLabel::from_value(transition_proximity),
            statuses,
            tension,
            backfilled_partitions: skew.backfilled,
        })
    }
}

/// Analyze a record with the default configuration.
pub fn analyze(record: &AggregateRecord) -> MetricsResult<SnapshotMetrics> {
    SignalEngine::default().analyze(record)
}

/// Copy of the hypotheses in weight-descending order. The sort is stable, so
/// equal weights keep their creation order.
pub fn sort_by_weight(hypotheses: &[Hypothesis]) -> Vec<Hypothesis> {
    let mut sorted = hypotheses.to_vec();
    sorted.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    sorted
}
