// src/config/loader.rs
//! Configuration loader with validation
//!
//! Reads an optional TOML override file from the data folder; when the file is
//! absent the built-in defaults apply. A present-but-invalid file is a fatal
//! configuration error, never silently ignored.

use std::path::Path;

use tracing::{debug, info};

use crate::config::AnalysisConfig;
use crate::error::{LsiError, LsiResult};

/// Load configuration from `path` if it exists, otherwise return defaults.
///
/// The returned configuration is always validated.
pub fn load_or_default(path: &Path) -> LsiResult<AnalysisConfig> {
    let config = if path.is_file() {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            LsiError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let parsed: AnalysisConfig = toml::from_str(&raw).map_err(|e| {
            LsiError::Config(format!("cannot parse {}: {}", path.display(), e))
        })?;
        info!(path = %path.display(), "loaded configuration override");
        parsed
    } else {
        debug!(path = %path.display(), "no configuration override, using defaults");
        AnalysisConfig::default()
    };

    config.validate()?;
    Ok(config)
}
