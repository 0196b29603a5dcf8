//! Tunables for the signal engine.
//!
//! Most thresholds are fixed contracts and live as constants next to the rule
//! that uses them. Only values that are still being calibrated are exposed here.

use serde::{Deserialize, Serialize};

use crate::error::{MetricsError, MetricsResult};

/// Configuration for [`crate::SignalEngine`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Concentration ratio (HHI over its uniform baseline) below which a
    /// distribution with a clear gap still reads as Diffuse.
    ///
    /// `None` disables the Diffuse branch. No production value has been
    /// calibrated yet.
    pub diffuse_ratio_threshold: Option<f64>,
}

impl MetricsConfig {
    /// Parse a configuration from TOML.
    pub fn from_toml_str(contents: &str) -> MetricsResult<Self> {
        let config: MetricsConfig =
            toml::from_str(contents).map_err(|e| MetricsError::Configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that cannot be meaningful.
    pub fn validate(&self) -> MetricsResult<()> {
        if let Some(threshold) = self.diffuse_ratio_threshold {
            if !threshold.is_finite() || threshold <= 0.0 {
                return Err(MetricsError::Configuration(format!(
                    "diffuse_ratio_threshold must be a positive finite number, got {}",
                    threshold
                )));
            }
        }
        Ok(())
    }
}
