//! Per-subject pipeline: validate, then analyze.
//!
//! Records are loaded up front and each subject runs on its own blocking
//! task. A failure for one subject is reported in its output and does not
//! affect the others.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use thesis_metrics::{SignalEngine, SnapshotMetrics};
use thesis_types::{AggregateRecord, SubjectIdentity};
use thesis_validator::Validator;

/// What the CLI prints for one subject.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectOutput {
    pub subject: SubjectIdentity,
    /// File the record was read from.
    pub source: String,
    /// Validator findings, followed by an analysis failure if there was one.
    pub errors: Vec<String>,
    /// `None` when analysis failed or was gated off by validation.
    pub metrics: Option<SnapshotMetrics>,
}

impl SubjectOutput {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.metrics.is_some()
    }
}

/// Shared, read-only state handed to every task.
#[derive(Clone, Debug, Default)]
pub struct Pipeline {
    pub engine: SignalEngine,
    pub validator: Validator,
    /// Skip analysis for records that fail validation.
    pub strict: bool,
}

impl Pipeline {
    /// Run one record through the validator and the engine.
    pub fn process(&self, source: &str, record: &AggregateRecord) -> SubjectOutput {
        let mut errors = self.validator.validate(record);

        let metrics = if self.strict && !errors.is_empty() {
            info!(
                ticker = %record.subject.ticker,
                "skipping analysis: record is not analysis-ready"
            );
            None
        } else {
            match self.engine.analyze(record) {
                Ok(metrics) => Some(metrics),
                Err(err) => {
                    warn!(ticker = %record.subject.ticker, error = %err, "analysis failed");
                    errors.push(format!("Analysis failed: {}", err));
                    None
                }
            }
        };

        SubjectOutput {
            subject: record.subject.clone(),
            source: source.to_string(),
            errors,
            metrics,
        }
    }

    /// Process every record concurrently, returning outputs in input order.
    pub async fn process_all(&self, records: Vec<(String, AggregateRecord)>) -> Result<Vec<SubjectOutput>> {
        let mut join_set = JoinSet::new();

        for (index, (source, record)) in records.into_iter().enumerate() {
            let pipeline = self.clone();
            join_set.spawn_blocking(move || (index, pipeline.process(&source, &record)));
        }

        let mut outputs = Vec::with_capacity(join_set.len());
        while let Some(joined) = join_set.join_next().await {
            let (index, output) = joined.context("subject task panicked")?;
            debug!(ticker = %output.subject.ticker, "subject finished");
            outputs.push((index, output));
        }

        outputs.sort_by_key(|(index, _)| *index);
        Ok(outputs.into_iter().map(|(_, output)| output).collect())
    }
}

/// Read and decode one record file.
pub async fn load_record(path: &Path) -> Result<AggregateRecord> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    AggregateRecord::from_json(&contents).with_context(|| format!("decoding {}", path.display()))
}

/// Read every file, keeping its path alongside the record.
pub async fn load_records(paths: &[PathBuf]) -> Result<Vec<(String, AggregateRecord)>> {
    let mut records = Vec::with_capacity(paths.len());
    for path in paths {
        let record = load_record(path).await?;
        records.push((path.display().to_string(), record));
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use thesis_types::{Hypothesis, RecordMetadata, Stance};

    fn record(weights: &[f64]) -> AggregateRecord {
        let hypotheses: Vec<Hypothesis> = weights
            .iter()
            .enumerate()
            .map(|(i, w)| Hypothesis::new(format!("H{}", i + 1), "h", Stance::Bullish, *w))
            .collect();
        AggregateRecord {
            subject: SubjectIdentity {
                ticker: "TEST".into(),
                name: "Test".into(),
                sector: None,
            },
            constructive: hypotheses.iter().map(|h| h.code.clone()).collect(),
            downside: vec![],
            hypotheses,
            evidence: vec![],
            tripwires: vec![],
            metadata: RecordMetadata::default(),
        }
    }

    #[test]
    fn validation_findings_do_not_block_analysis_by_default() {
        let output = Pipeline::default().process("mem", &record(&[0.6, 0.4]));
        // Only the tripwire rule fires.
        assert_eq!(output.errors.len(), 1);
        assert!(output.metrics.is_some());
        assert!(!output.is_clean());
    }

    #[test]
    fn strict_mode_gates_analysis() {
        let pipeline = Pipeline {
            strict: true,
            ..Pipeline::default()
        };
        let output = pipeline.process("mem", &record(&[0.6, 0.4]));
        assert!(output.metrics.is_none());
    }

    #[test]
    fn analysis_failure_is_reported_not_raised() {
        let output = Pipeline::default().process("mem", &record(&[]));
        assert!(output.metrics.is_none());
        assert!(output
            .errors
            .last()
            .is_some_and(|e| e.starts_with("Analysis failed")));
    }

    #[tokio::test]
    async fn process_all_keeps_input_order() {
        let records: Vec<(String, AggregateRecord)> = (0..6)
            .map(|i| {
                let mut r = record(&[0.7, 0.3]);
                r.subject.ticker = format!("T{}", i);
                (format!("file{}", i), r)
            })
            .collect();
        let outputs = Pipeline::default().process_all(records).await.unwrap();
        let tickers: Vec<&str> = outputs.iter().map(|o| o.subject.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["T0", "T1", "T2", "T3", "T4", "T5"]);
    }
}
