// src/config/mod.rs
//! Configuration management for the LSI pipeline

pub mod constants;
pub mod loader;

pub use constants::*;
pub use loader::load_or_default;

use serde::{Deserialize, Serialize};

use crate::error::{LsiError, LsiResult};

/// Complete analysis configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub pipeline: PipelineSettings,

    #[serde(default)]
    pub stats: StatsSettings,
}

/// Settings for envelope extraction and symmetry classification
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PipelineSettings {
    /// Width of the centered moving-average window, in samples
    #[serde(default = "defaults::smoothing_window")]
    pub smoothing_window: usize,

    /// Peak-LSI percentage below which a participant is flagged as deficient
    #[serde(default = "defaults::deficit_threshold_pct")]
    pub deficit_threshold_pct: f64,
}

/// Settings for the downstream group comparison
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StatsSettings {
    /// LSI values at or above this cutoff are excluded before testing
    #[serde(default = "defaults::outlier_cutoff_pct")]
    pub outlier_cutoff_pct: f64,

    /// Two-tailed significance level
    #[serde(default = "defaults::significance_level")]
    pub significance_level: f64,
}

/// Default value providers using constants
mod defaults {
    use crate::config::constants::*;

    pub fn smoothing_window() -> usize { envelope::DEFAULT_SMOOTHING_WINDOW }
    pub fn deficit_threshold_pct() -> f64 { symmetry::DEFAULT_DEFICIT_THRESHOLD_PCT }
    pub fn outlier_cutoff_pct() -> f64 { stats::DEFAULT_OUTLIER_CUTOFF_PCT }
    pub fn significance_level() -> f64 { stats::DEFAULT_SIGNIFICANCE_LEVEL }
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            smoothing_window: defaults::smoothing_window(),
            deficit_threshold_pct: defaults::deficit_threshold_pct(),
        }
    }
}

impl Default for StatsSettings {
    fn default() -> Self {
        Self {
            outlier_cutoff_pct: defaults::outlier_cutoff_pct(),
            significance_level: defaults::significance_level(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            pipeline: PipelineSettings::default(),
            stats: StatsSettings::default(),
        }
    }
}

impl AnalysisConfig {
    /// Validate configuration values against allowed ranges
    pub fn validate(&self) -> LsiResult<()> {
        if self.pipeline.smoothing_window < envelope::MIN_SMOOTHING_WINDOW
            || self.pipeline.smoothing_window > envelope::MAX_SMOOTHING_WINDOW
        {
            return Err(LsiError::Config(format!(
                "smoothing_window {} outside [{}, {}]",
                self.pipeline.smoothing_window,
                envelope::MIN_SMOOTHING_WINDOW,
                envelope::MAX_SMOOTHING_WINDOW
            )));
        }
        if self.pipeline.deficit_threshold_pct <= 0.0 {
            return Err(LsiError::Config(format!(
                "deficit_threshold_pct must be positive, got {}",
                self.pipeline.deficit_threshold_pct
            )));
        }
        if self.stats.outlier_cutoff_pct <= 0.0 {
            return Err(LsiError::Config(format!(
                "outlier_cutoff_pct must be positive, got {}",
                self.stats.outlier_cutoff_pct
            )));
        }
        if !(0.0..1.0).contains(&self.stats.significance_level) {
            return Err(LsiError::Config(format!(
                "significance_level must be in (0, 1), got {}",
                self.stats.significance_level
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AnalysisConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.pipeline.smoothing_window, 100);
        assert_eq!(config.pipeline.deficit_threshold_pct, 90.0);
        assert_eq!(config.stats.outlier_cutoff_pct, 200.0);
    }

    #[test]
    fn test_zero_window_rejected() {
        let mut config = AnalysisConfig::default();
        config.pipeline.smoothing_window = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_threshold_rejected() {
        let mut config = AnalysisConfig::default();
        config.pipeline.deficit_threshold_pct = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: AnalysisConfig = toml::from_str(
            r#"
            [pipeline]
            smoothing_window = 50
            "#,
        )
        .unwrap();
        assert_eq!(config.pipeline.smoothing_window, 50);
        assert_eq!(config.pipeline.deficit_threshold_pct, 90.0);
        assert_eq!(config.stats.significance_level, 0.05);
    }
}
