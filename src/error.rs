// src/error.rs
//! Unified error handling for the LSI analysis pipeline
//!
//! Errors fall into two bands: whole-table failures (missing or corrupt input
//! files, shape problems detected at load time) abort the run, while
//! per-participant conditions are recovered locally inside the aggregator and
//! never surface here.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for the LSI pipeline
#[derive(Debug, Error)]
pub enum LsiError {
    /// Input table could not be opened or read
    #[error("failed to read input table {path}: {source}")]
    TableRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input table opened but could not be parsed as delimited text
    #[error("malformed table {path}: {source}")]
    TableParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Output artifact could not be written
    #[error("failed to write {path}: {reason}")]
    Write { path: PathBuf, reason: String },

    /// Configuration file or values rejected
    #[error("configuration error: {0}")]
    Config(String),

    /// Table shapes are incompatible with the positional join
    #[error("table shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Every participant filtered out; no summary to write
    #[error("no participants produced usable metrics")]
    NoParticipants,

    /// Chart rendering failed
    #[error("chart rendering failed: {0}")]
    Render(String),
}

impl LsiError {
    /// Whether this error should abort the whole run
    pub fn is_fatal(&self) -> bool {
        !matches!(self, LsiError::NoParticipants)
    }
}

/// Convenience alias used throughout the crate
pub type LsiResult<T> = Result<T, LsiError>;
