//! Structural validator: checks a record for internal consistency before
//! it is analysed.
//!
//! Every rule runs on every call; a record with several problems reports all
//! of them in one pass. Findings are returned as data and never repaired.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, warn};

use thesis_types::{AggregateRecord, HypothesisCode};

use crate::config::ValidatorConfig;
use crate::credibility::CredibilityPolicy;
use crate::error::ValidatorResult;
use crate::FLOAT_TOLERANCE;

// ── Issue Kind ─────────────────────────────────────────────────────────

/// Which rule a finding came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IssueKind {
    WeightSum,
    NonPositiveWeight,
    CredibilityCeiling,
    TooFewTripwires,
    DuplicateCode,
    UnknownPartitionCode,
    PartitionOverlap,
    Unpartitioned,
    UnknownEvidenceTarget,
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = match self {
            Self::WeightSum => "WEIGHT_SUM",
            Self::NonPositiveWeight => "NON_POSITIVE_WEIGHT",
            Self::CredibilityCeiling => "CREDIBILITY_CEILING",
            Self::TooFewTripwires => "TOO_FEW_TRIPWIRES",
            Self::DuplicateCode => "DUPLICATE_CODE",
            Self::UnknownPartitionCode => "UNKNOWN_PARTITION_CODE",
            Self::PartitionOverlap => "PARTITION_OVERLAP",
            Self::Unpartitioned => "UNPARTITIONED",
            Self::UnknownEvidenceTarget => "UNKNOWN_EVIDENCE_TARGET",
        };
        write!(f, "{}", code)
    }
}

// ── Validation Issue ───────────────────────────────────────────────────

/// A single rule violation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationIssue {
    pub kind: IssueKind,
    /// Human-readable description.
    pub description: String,
}

impl ValidationIssue {
    fn new(kind: IssueKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.kind, self.description)
    }
}

// ── Validation Report ──────────────────────────────────────────────────

/// Outcome of validating one record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationReport {
    pub ticker: String,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// True when no rule was violated.
    pub fn is_analysis_ready(&self) -> bool {
        self.issues.is_empty()
    }

    /// Issue descriptions, in the order the rules ran.
    pub fn errors(&self) -> Vec<String> {
        self.issues.iter().map(|i| i.description.clone()).collect()
    }

    /// Count of issues raised by a given rule.
    pub fn count_of(&self, kind: IssueKind) -> usize {
        self.issues.iter().filter(|i| i.kind == kind).count()
    }
}

// ── Validator ──────────────────────────────────────────────────────────

/// Runs the structural rules against aggregate records.
#[derive(Clone, Debug, Default)]
pub struct Validator {
    config: ValidatorConfig,
    policy: CredibilityPolicy,
}

impl Validator {
    /// Validator with default tolerances and only the Corporate ceiling.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validator with explicit configuration.
    pub fn with_config(config: ValidatorConfig) -> ValidatorResult<Self> {
        config.validate()?;
        let policy = CredibilityPolicy::from_rules(&config.credibility_ceilings);
        Ok(Self { config, policy })
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub fn policy(&self) -> &CredibilityPolicy {
        &self.policy
    }

    /// Run every rule and collect the findings.
    pub fn check(&self, record: &AggregateRecord) -> ValidationReport {
        let mut issues = Vec::new();

        self.check_weight_sum(record, &mut issues);
        self.check_positive_weights(record, &mut issues);
        self.check_credibility(record, &mut issues);
        self.check_tripwires(record, &mut issues);
        self.check_codes(record, &mut issues);

        let report = ValidationReport {
            ticker: record.subject.ticker.clone(),
            issues,
        };
        if report.is_analysis_ready() {
            debug!(ticker = %report.ticker, "record passed structural validation");
        } else {
            warn!(
                ticker = %report.ticker,
                issues = report.issues.len(),
                "record failed structural validation"
            );
        }
        report
    }

    /// Run every rule and return the error strings. Empty means valid.
    pub fn validate(&self, record: &AggregateRecord) -> Vec<String> {
        self.check(record).errors()
    }

    fn check_weight_sum(&self, record: &AggregateRecord, issues: &mut Vec<ValidationIssue>) {
        let sum = record.weight_sum();
        let limit = self.config.weight_sum_tolerance + FLOAT_TOLERANCE;
        if !sum.is_finite() || (sum - 1.0).abs() > limit {
            issues.push(ValidationIssue::new(
                IssueKind::WeightSum,
                format!(
                    "Weight sum {:.4} is outside 1.0 ± {}",
                    sum, self.config.weight_sum_tolerance
                ),
            ));
        }
    }

    fn check_positive_weights(&self, record: &AggregateRecord, issues: &mut Vec<ValidationIssue>) {
        // NaN fails `> 0.0` as well.
        for h in record.hypotheses.iter().filter(|h| !(h.weight > 0.0)) {
            issues.push(ValidationIssue::new(
                IssueKind::NonPositiveWeight,
                format!("Hypothesis {} has non-positive weight {}", h.code, h.weight),
            ));
        }
    }

    fn check_credibility(&self, record: &AggregateRecord, issues: &mut Vec<ValidationIssue>) {
        for item in record.evidence.iter().filter(|e| !self.policy.permits(e)) {
            let ceiling = self
                .policy
                .ceiling(item.domain)
                .map(|q| q.to_string())
                .unwrap_or_default();
            issues.push(ValidationIssue::new(
                IssueKind::CredibilityCeiling,
                format!(
                    "Evidence {} ({}) rated {} exceeds the {} ceiling of {}",
                    item.id, item.title, item.quality, item.domain, ceiling
                ),
            ));
        }
    }

    fn check_tripwires(&self, record: &AggregateRecord, issues: &mut Vec<ValidationIssue>) {
        let count = record.tripwires.len();
        if count < self.config.min_tripwires {
            issues.push(ValidationIssue::new(
                IssueKind::TooFewTripwires,
                format!(
                    "Only {} tripwire(s) defined; at least {} required",
                    count, self.config.min_tripwires
                ),
            ));
        }
    }

    fn check_codes(&self, record: &AggregateRecord, issues: &mut Vec<ValidationIssue>) {
        let mut seen: BTreeMap<&HypothesisCode, usize> = BTreeMap::new();
        for h in &record.hypotheses {
            *seen.entry(&h.code).or_default() += 1;
        }
        for (code, count) in seen.iter().filter(|(_, count)| **count > 1) {
            issues.push(ValidationIssue::new(
                IssueKind::DuplicateCode,
                format!("Hypothesis code {} appears {} times", code, count),
            ));
        }

        let constructive: BTreeSet<&HypothesisCode> = record.constructive.iter().collect();
        let downside: BTreeSet<&HypothesisCode> = record.downside.iter().collect();

        for (side, codes) in [("constructive", &constructive), ("downside", &downside)] {
            for code in codes.iter().filter(|c| !seen.contains_key(*c)) {
                issues.push(ValidationIssue::new(
                    IssueKind::UnknownPartitionCode,
                    format!("The {} partition names unknown hypothesis {}", side, code),
                ));
            }
        }

        for code in seen.keys() {
            match (constructive.contains(*code), downside.contains(*code)) {
                (true, true) => issues.push(ValidationIssue::new(
                    IssueKind::PartitionOverlap,
                    format!(
                        "Hypothesis {} is in both the constructive and downside partitions",
                        code
                    ),
                )),
                (false, false) => issues.push(ValidationIssue::new(
                    IssueKind::Unpartitioned,
                    format!("Hypothesis {} is in neither partition", code),
                )),
                _ => {}
            }
        }

        for item in &record.evidence {
            let unknown: BTreeSet<&HypothesisCode> = item
                .referenced_codes()
                .filter(|c| !seen.contains_key(*c))
                .collect();
            for code in unknown {
                issues.push(ValidationIssue::new(
                    IssueKind::UnknownEvidenceTarget,
                    format!("Evidence {} references unknown hypothesis {}", item.id, code),
                ));
            }
        }
    }
}

/// Validate with default configuration.
pub fn validate(record: &AggregateRecord) -> Vec<String> {
    Validator::new().validate(record)
}
