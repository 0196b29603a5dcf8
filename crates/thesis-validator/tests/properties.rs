//! Property tests: the validator is a pure function of the record.

use proptest::prelude::*;
use thesis_types::{AggregateRecord, Hypothesis, HypothesisCode, Stance, SubjectIdentity};
use thesis_validator::*;

fn arb_stance() -> impl Strategy<Value = Stance> {
    prop_oneof![Just(Stance::Bullish), Just(Stance::Neutral), Just(Stance::Bearish)]
}

/// Records with arbitrary (possibly invalid) weights and partitions.
fn arb_record() -> impl Strategy<Value = AggregateRecord> {
    prop::collection::vec((-0.5f64..1.0, arb_stance(), 0u8..4), 0..8).prop_map(|rows| {
        let mut constructive = Vec::new();
        let mut downside = Vec::new();
        let hypotheses = rows
            .iter()
            .enumerate()
            .map(|(i, (weight, stance, side))| {
                let code = HypothesisCode::new(format!("H{}", i + 1));
                match side {
                    0 => constructive.push(code.clone()),
                    1 => downside.push(code.clone()),
                    2 => {
                        constructive.push(code.clone());
                        downside.push(code.clone());
                    }
                    _ => {}
                }
                Hypothesis::new(code.as_str(), "h", *stance, *weight)
            })
            .collect();
        AggregateRecord {
            subject: SubjectIdentity {
                ticker: "PROP".into(),
                name: "Property".into(),
                sector: None,
            },
            hypotheses,
            constructive,
            downside,
            evidence: vec![],
            tripwires: vec![],
            metadata: Default::default(),
        }
    })
}

proptest! {
    /// Re-running on an unmodified record yields the identical error list.
    #[test]
    fn validation_is_idempotent(record in arb_record()) {
        let validator = Validator::new();
        prop_assert_eq!(validator.validate(&record), validator.validate(&record));
    }

    /// One non-positive finding per offending hypothesis.
    #[test]
    fn non_positive_count_matches(record in arb_record()) {
        let expected = record.hypotheses.iter().filter(|h| h.weight <= 0.0).count();
        let report = Validator::new().check(&record);
        prop_assert_eq!(report.count_of(IssueKind::NonPositiveWeight), expected);
    }

    /// Records without tripwires are never analysis-ready.
    #[test]
    fn missing_tripwires_always_reported(record in arb_record()) {
        let report = Validator::new().check(&record);
        prop_assert!(!report.is_analysis_ready());
        prop_assert_eq!(report.count_of(IssueKind::TooFewTripwires), 1);
    }
}
