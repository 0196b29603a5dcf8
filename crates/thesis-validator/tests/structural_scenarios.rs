//! Structural scenarios against a complete JSON record.

use thesis_types::{AggregateRecord, EvidenceDomain, EvidenceQuality};
use thesis_validator::*;

const WOW: &str = include_str!("fixtures/wow.json");

fn wow() -> AggregateRecord {
    AggregateRecord::from_json(WOW).unwrap()
}

#[test]
fn fixture_is_analysis_ready() {
    let report = Validator::new().check(&wow());
    assert_eq!(report.ticker, "WOW.AX");
    assert!(report.is_analysis_ready(), "{:?}", report.issues);
}

#[test]
fn corporate_upgrade_breaches_ceiling() {
    let mut record = wow();
    record.evidence[1].quality = EvidenceQuality::High;
    let errors = validate(&record);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("ceiling"));
    assert!(errors[0].contains("E2"));
}

#[test]
fn single_tripwire_is_not_enough() {
    let mut record = wow();
    record.tripwires.pop();
    let errors = validate(&record);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("tripwire"));
}

#[test]
fn reweighting_without_renormalising_is_caught() {
    let mut record = wow();
    record.hypotheses[1].weight = 0.45;
    let errors = validate(&record);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("Weight sum"));
}

#[test]
fn every_violation_is_listed() {
    let mut record = wow();
    record.hypotheses[2].weight = 0.0;
    record.hypotheses[3].weight = -0.05;
    record.evidence[1].quality = EvidenceQuality::High;
    record.tripwires.clear();

    let report = Validator::new().check(&record);
    assert!(!report.is_analysis_ready());
    assert_eq!(report.count_of(IssueKind::WeightSum), 1);
    assert_eq!(report.count_of(IssueKind::NonPositiveWeight), 2);
    assert_eq!(report.count_of(IssueKind::CredibilityCeiling), 1);
    assert_eq!(report.count_of(IssueKind::TooFewTripwires), 1);

    let non_positive = report
        .errors()
        .iter()
        .filter(|e| e.contains("non-positive"))
        .count();
    assert_eq!(non_positive, 2);
}

#[test]
fn stricter_configuration_from_toml() {
    let config = ValidatorConfig::from_toml_str(
        r#"
        weight_sum_tolerance = 0.001
        min_tripwires = 3

        [[credibility_ceilings]]
        domain = "Regulatory"
        max_quality = "MEDIUM"
        "#,
    )
    .unwrap();
    let validator = Validator::with_config(config).unwrap();
    assert_eq!(
        validator.policy().ceiling(EvidenceDomain::Regulatory),
        Some(EvidenceQuality::Medium)
    );

    let report = validator.check(&wow());
    assert_eq!(report.count_of(IssueKind::TooFewTripwires), 1);
    assert_eq!(report.count_of(IssueKind::CredibilityCeiling), 1);
    assert_eq!(report.count_of(IssueKind::WeightSum), 0);
}

#[test]
fn validation_never_mutates_the_record() {
    let record = wow();
    let before = record.clone();
    let _ = validate(&record);
    assert_eq!(record, before);
}
