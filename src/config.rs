//! Configuration loaded once at startup from `config.yaml`.

use serde::Deserialize;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use crate::encoding::FeatureLayout;
use crate::model::LabelMapping;
use crate::BpPolicy;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub model: ModelConfig,
    #[serde(default)]
    pub labels: LabelMapping,
    #[serde(default)]
    pub policy: BpPolicy,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Deserialize)]
pub struct ModelConfig {
    /// Path to the serialized classifier artifact.
    pub path: String,
    /// Vector shape the artifact was trained with.
    pub layout: FeatureLayout,
}

#[derive(Debug, Deserialize)]
pub struct ReportConfig {
    pub output_dir: String,
    pub lines_per_page: Option<usize>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            output_dir: "reports".to_string(),
            lines_per_page: None,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(serde_yaml::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Failed to read config: {}", e),
            ConfigError::Parse(e) => write!(f, "Failed to parse config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let raw = fs::read_to_string(path).map_err(ConfigError::Io)?;
    serde_yaml::from_str(&raw).map_err(ConfigError::Parse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_full_config() {
        let yaml = r#"
model:
  path: malpred.json
  layout: symptoms_with_vitals
labels:
  positive: High Possibility
  negative: Low Possibility
policy: block_on_invalid
report:
  output_dir: out
  lines_per_page: 30
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.model.path, "malpred.json");
        assert_eq!(config.model.layout, FeatureLayout::SymptomsWithVitals);
        assert_eq!(config.labels.positive, "High Possibility");
        assert_eq!(config.policy, BpPolicy::BlockOnInvalid);
        assert_eq!(config.report.output_dir, "out");
        assert_eq!(config.report.lines_per_page, Some(30));
    }

    #[test]
    fn optional_sections_fall_back_to_defaults() {
        let yaml = r#"
model:
  path: malpred.json
  layout: symptoms_only
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.labels, LabelMapping::default());
        assert_eq!(config.policy, BpPolicy::ProceedWithPlaceholder);
        assert_eq!(config.report.output_dir, "reports");
    }
}
