//! CLI configuration

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use thesis_metrics::MetricsConfig;
use thesis_validator::ValidatorConfig;

/// CLI configuration. Each table is handed to the crate that owns it.
///
/// ```toml
/// [metrics]
/// diffuse_ratio_threshold = 1.2
///
/// [validator]
/// min_tripwires = 2
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThesisConfig {
    pub metrics: MetricsConfig,
    pub validator: ValidatorConfig,
}

impl ThesisConfig {
    /// Load configuration from file, falling back to defaults when the file
    /// does not exist.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config_path = match path {
            Some(p) => PathBuf::from(p),
            None => Self::default_config_path()?,
        };

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)
                .with_context(|| format!("reading {}", config_path.display()))?;
            Self::from_toml_str(&contents)
                .with_context(|| format!("parsing {}", config_path.display()))
        } else {
            Ok(ThesisConfig::default())
        }
    }

    /// Parse and check a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: ThesisConfig = toml::from_str(contents)?;
        config.metrics.validate()?;
        config.validator.validate()?;
        Ok(config)
    }

    fn default_config_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().ok_or_else(|| anyhow!("cannot find config directory"))?;
        Ok(config_dir.join("thesis").join("config.toml"))
    }
}
