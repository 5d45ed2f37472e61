//! EMG-LSI: Limb symmetry index analysis for surface EMG recordings
//!
//! This library computes Limb Symmetry Index (LSI) metrics from paired sEMG
//! recordings of an involved (surgical) and uninvolved (healthy) limb. It
//! features:
//!
//! - Channel conditioning: paired NaN removal, rectification, and a
//!   centered moving-average linear envelope
//! - Peak and integrated-work metrics via composite Simpson quadrature
//! - Batch symmetry aggregation with deficit classification
//! - CSV table I/O, chart rendering, and group-level statistics
//!
//! # Quick Start
//!
//! ```rust
//! use emg_lsi::config::PipelineSettings;
//! use emg_lsi::processing::ChannelProcessor;
//!
//! let processor = ChannelProcessor::new(&PipelineSettings::default());
//! let amplitude: Vec<f64> = (0..500).map(|i| (i as f64 * 0.05).sin()).collect();
//! let time: Vec<f64> = (0..500).map(|i| i as f64 * 0.001).collect();
//!
//! let metrics = processor.process(&amplitude, &time).expect("usable samples");
//! assert!(metrics.peak >= 0.0);
//! assert!(metrics.work >= 0.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod io;
pub mod pipeline;
pub mod processing;
pub mod stats;
pub mod symmetry;
pub mod viz;

// Re-export commonly used types for convenience
pub use error::{LsiError, LsiResult};
pub use pipeline::{run_analysis, run_group_analysis, RunReport};
pub use processing::{ChannelMetrics, ChannelProcessor};
pub use symmetry::{ParticipantRecord, SummaryTable, SymmetryAggregator};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
