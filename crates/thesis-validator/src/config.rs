//! Validator configuration.

use serde::{Deserialize, Serialize};

use thesis_types::{EvidenceDomain, EvidenceQuality};

use crate::error::{ValidatorError, ValidatorResult};

/// Maximum quality permitted for evidence from one domain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CeilingRule {
    pub domain: EvidenceDomain,
    pub max_quality: EvidenceQuality,
}

/// Configuration for [`crate::Validator`].
///
/// ```toml
/// weight_sum_tolerance = 0.01
/// min_tripwires = 2
///
/// [[credibility_ceilings]]
/// domain = "Media"
/// max_quality = "MEDIUM"
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Allowed absolute deviation of the weight sum from 1.0.
    pub weight_sum_tolerance: f64,
    /// Minimum number of tripwires a record must declare.
    pub min_tripwires: usize,
    /// Extra domain ceilings. Corporate is always capped at Medium regardless.
    pub credibility_ceilings: Vec<CeilingRule>,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            weight_sum_tolerance: 0.01,
            min_tripwires: 2,
            credibility_ceilings: Vec::new(),
        }
    }
}

impl ValidatorConfig {
    /// Parse a configuration from TOML.
    pub fn from_toml_str(contents: &str) -> ValidatorResult<Self> {
        let config: ValidatorConfig =
            toml::from_str(contents).map_err(|e| ValidatorError::Configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that cannot be meaningful.
    pub fn validate(&self) -> ValidatorResult<()> {
        if !self.weight_sum_tolerance.is_finite() || self.weight_sum_tolerance < 0.0 {
            return Err(ValidatorError::Configuration(format!(
                "weight_sum_tolerance must be a non-negative finite number, got {}",
                self.weight_sum_tolerance
            )));
        }
        Ok(())
    }
}
