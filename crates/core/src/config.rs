use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid pipeline config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Operational parameters for a pipeline instance.
///
/// `threshold` is the default confidence cutoff; callers still pass a
/// threshold per invocation so the UI can tune it live. `languages` is
/// handed opaquely to the OCR engine at construction time and never
/// interpreted here.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Confidence cutoff below which a detection is flagged as uncertain.
    pub threshold: f32,
    /// Longest allowed image dimension in pixels; larger images are downscaled.
    pub max_dimension: u32,
    /// Language codes for the OCR engine.
    pub languages: Vec<String>,
    /// Currency code stamped on every structured record.
    pub currency: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            threshold: 0.7,
            max_dimension: 2000,
            languages: vec!["en".to_string()],
            currency: "RM".to_string(),
        }
    }
}

impl PipelineConfig {
    /// Parse from TOML, clamping the threshold into [0, 1].
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let mut config: PipelineConfig = toml::from_str(s)?;
        config.threshold = config.threshold.clamp(0.0, 1.0);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.threshold, 0.7);
        assert_eq!(config.max_dimension, 2000);
        assert_eq!(config.languages, vec!["en".to_string()]);
        assert_eq!(config.currency, "RM");
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config = PipelineConfig::from_toml_str("threshold = 0.5").unwrap();
        assert_eq!(config.threshold, 0.5);
        assert_eq!(config.max_dimension, 2000);
        assert_eq!(config.currency, "RM");
    }

    #[test]
    fn out_of_range_threshold_is_clamped() {
        let config = PipelineConfig::from_toml_str("threshold = 1.8").unwrap();
        assert_eq!(config.threshold, 1.0);
        let config = PipelineConfig::from_toml_str("threshold = -0.2").unwrap();
        assert_eq!(config.threshold, 0.0);
    }

    #[test]
    fn languages_and_currency_from_toml() {
        let config = PipelineConfig::from_toml_str(
            "languages = [\"en\", \"ms\"]\ncurrency = \"MYR\"",
        )
        .unwrap();
        assert_eq!(config.languages, vec!["en".to_string(), "ms".to_string()]);
        assert_eq!(config.currency, "MYR");
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(PipelineConfig::from_toml_str("threshold = ").is_err());
    }
}
