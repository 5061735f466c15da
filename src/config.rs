//! Configuration management for the screener

use crate::error::{Result, ScreenerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub processing: ProcessingConfig,
    pub output: OutputConfig,
}

/// Weights and verdict thresholds used by the candidate evaluator.
///
/// All scores live on a 0-100 scale, so thresholds are expressed on that
/// scale as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub keyword_weight: f64,
    pub content_weight: f64,
    pub blended_weight: f64,
    pub highly_qualified_threshold: f64,
    pub partially_qualified_threshold: f64,
    pub max_matched_keywords: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingConfig {
    pub max_concurrency: usize,
    pub enable_cache: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            keyword_weight: 0.30,
            content_weight: 0.40,
            blended_weight: 0.30,
            highly_qualified_threshold: 75.0,
            partially_qualified_threshold: 50.0,
            max_matched_keywords: 20,
        }
    }
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        let max_concurrency = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);

        Self {
            max_concurrency,
            enable_cache: true,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scoring: ScoringConfig::default(),
            processing: ProcessingConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

impl ScoringConfig {
    pub fn weight_sum(&self) -> f64 {
        self.keyword_weight + self.content_weight + self.blended_weight
    }

    pub fn validate(&self) -> Result<()> {
        let weights = [
            ("keyword_weight", self.keyword_weight),
            ("content_weight", self.content_weight),
            ("blended_weight", self.blended_weight),
        ];
        for (name, weight) in weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ScreenerError::Configuration(format!(
                    "scoring.{} must be a non-negative number, got {}",
                    name, weight
                )));
            }
        }
        if (self.weight_sum() - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ScreenerError::Configuration(format!(
                "scoring weights must sum to 1.0, got {}",
                self.weight_sum()
            )));
        }

        let thresholds = [
            ("highly_qualified_threshold", self.highly_qualified_threshold),
            ("partially_qualified_threshold", self.partially_qualified_threshold),
        ];
        for (name, threshold) in thresholds {
            if !threshold.is_finite() || !(0.0..=100.0).contains(&threshold) {
                return Err(ScreenerError::Configuration(format!(
                    "scoring.{} must be within 0-100, got {}",
                    name, threshold
                )));
            }
        }
        if self.partially_qualified_threshold > self.highly_qualified_threshold {
            return Err(ScreenerError::Configuration(format!(
                "partially_qualified_threshold ({}) exceeds highly_qualified_threshold ({})",
                self.partially_qualified_threshold, self.highly_qualified_threshold
            )));
        }

        Ok(())
    }
}

impl Config {
    /// Load from the default location, writing defaults out on first use.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    /// Load from an explicit path. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ScreenerError::Configuration(format!("Failed to read config {}: {}", path.display(), e))
        })?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| ScreenerError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ScreenerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.scoring.validate()?;
        if self.processing.max_concurrency == 0 {
            return Err(ScreenerError::Configuration(
                "processing.max_concurrency must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("ats-screener")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_weights_sum_to_one() {
        let scoring = ScoringConfig::default();
        assert!((scoring.weight_sum() - 1.0).abs() < 1e-9);
        assert_eq!(scoring.highly_qualified_threshold, 75.0);
        assert_eq!(scoring.partially_qualified_threshold, 50.0);
        assert_eq!(scoring.max_matched_keywords, 20);
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.scoring.keyword_weight = 0.5;
        config.scoring.content_weight = 0.25;
        config.scoring.blended_weight = 0.25;
        config.output.format = OutputFormat::Markdown;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let dir = TempDir::new().unwrap();
        let result = Config::load_from(&dir.path().join("missing.toml"));
        assert!(matches!(result, Err(ScreenerError::Configuration(_))));
    }

    #[test]
    fn test_negative_weight_rejected() {
        let mut scoring = ScoringConfig::default();
        scoring.content_weight = -0.1;
        assert!(scoring.validate().is_err());
    }

    #[test]
    fn test_all_zero_weights_rejected() {
        let scoring = ScoringConfig {
            keyword_weight: 0.0,
            content_weight: 0.0,
            blended_weight: 0.0,
            ..ScoringConfig::default()
        };
        assert!(scoring.validate().is_err());
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        let scoring = ScoringConfig {
            keyword_weight: 1.0,
            content_weight: 1.0,
            blended_weight: 1.0,
            ..ScoringConfig::default()
        };
        assert!(matches!(scoring.validate(), Err(ScreenerError::Configuration(_))));

        let scoring = ScoringConfig {
            keyword_weight: 0.1,
            content_weight: 0.1,
            blended_weight: 0.1,
            ..ScoringConfig::default()
        };
        assert!(scoring.validate().is_err());
    }

    #[test]
    fn test_oversized_weights_rejected_on_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.scoring.keyword_weight = 1.0;
        config.scoring.content_weight = 1.0;
        config.scoring.blended_weight = 1.0;
        config.save_to(&path).unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ScreenerError::Configuration(_))
        ));
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let scoring = ScoringConfig {
            highly_qualified_threshold: 40.0,
            partially_qualified_threshold: 60.0,
            ..ScoringConfig::default()
        };
        assert!(scoring.validate().is_err());
    }

    #[test]
    fn test_invalid_file_contents_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "scoring = \"nope\"").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
