//! JSON output

use anyhow::Result;
use serde::Serialize;

use thesis_validator::ValidationReport;

/// Validator-only result for one file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationOutput {
    pub ticker: String,
    pub source: String,
    pub errors: Vec<String>,
}

impl ValidationOutput {
    pub fn new(source: &str, report: ValidationReport) -> Self {
        Self {
            errors: report.errors(),
            ticker: report.ticker,
            source: source.to_string(),
        }
    }
}

/// Serialize results as compact or pretty JSON.
pub fn render<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}
