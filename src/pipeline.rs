// src/pipeline.rs
//! End-to-end batch runs
//!
//! Wires the table loaders, the symmetry aggregator, and the output sinks
//! into the two runs the binaries expose: the per-participant LSI analysis
//! and the downstream group comparison. All paths are resolved against one
//! data folder; a failed table load aborts the run before any output exists.

use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::config::{self, files};
use crate::error::{LsiError, LsiResult};
use crate::io::{self, LimbData};
use crate::stats::{self, SpeedComparison};
use crate::symmetry::SymmetryAggregator;
use crate::viz;

/// Outcome of a per-participant analysis run
#[derive(Debug)]
pub struct RunReport {
    pub participants: usize,
    pub mean_peak_lsi: f64,
    pub summary_path: PathBuf,
    pub chart_path: PathBuf,
}

/// Run the per-participant LSI analysis over the four tables in `data_dir`.
///
/// Writes the summary CSV and the representative comparison chart. A run in
/// which every participant filtered out writes nothing and returns
/// [`LsiError::NoParticipants`].
pub fn run_analysis(data_dir: &Path) -> LsiResult<RunReport> {
    info!(data_dir = %data_dir.display(), "initializing biomechanical analysis");

    let config = config::load_or_default(&data_dir.join(files::CONFIG_OVERRIDE))?;

    let involved = LimbData::load(
        &data_dir.join(files::INVOLVED_AMPLITUDE),
        &data_dir.join(files::INVOLVED_TIME),
    )?;
    let uninvolved = LimbData::load(
        &data_dir.join(files::UNINVOLVED_AMPLITUDE),
        &data_dir.join(files::UNINVOLVED_TIME),
    )?;

    let aggregator = SymmetryAggregator::new(&config.pipeline);
    let summary = aggregator.aggregate(&involved, &uninvolved);

    if summary.is_empty() {
        error!("no data processed; check column consistency across the four tables");
        return Err(LsiError::NoParticipants);
    }

    let summary_path = data_dir.join(files::SUMMARY_OUTPUT);
    io::write_summary(&summary_path, &summary)?;

    let mean_peak_lsi = summary.mean_peak_lsi();
    info!(
        participants = summary.records.len(),
        group_average_lsi = format!("{:.2}", mean_peak_lsi),
        "summary saved"
    );

    let chart_path = data_dir.join(files::COMPARISON_CHART);
    if let Some(representative) = &summary.representative {
        viz::render_comparison(&chart_path, representative)?;
    }

    Ok(RunReport {
        participants: summary.records.len(),
        mean_peak_lsi,
        summary_path,
        chart_path,
    })
}

/// Run the group-level comparison over the long-format results in `data_dir`.
///
/// Screens outliers, tests each speed condition, and renders the grouped
/// chart. Returns the per-speed comparisons for reporting.
pub fn run_group_analysis(data_dir: &Path) -> LsiResult<Vec<SpeedComparison>> {
    let config = config::load_or_default(&data_dir.join(files::CONFIG_OVERRIDE))?;

    let rows = stats::load_group_results(&data_dir.join(files::GROUP_RESULTS))?;
    let rows = stats::filter_outliers(rows, config.stats.outlier_cutoff_pct);
    if rows.is_empty() {
        error!("no measurements survived outlier screening");
        return Err(LsiError::NoParticipants);
    }

    let comparisons = stats::compare_by_speed(&rows, &config.stats);
    viz::render_group_chart(&data_dir.join(files::GROUP_CHART), &rows)?;

    Ok(comparisons)
}

pub use crate::config::files::{COMPARISON_CHART, GROUP_CHART, GROUP_RESULTS, SUMMARY_OUTPUT};
