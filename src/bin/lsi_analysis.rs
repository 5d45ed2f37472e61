// src/bin/lsi_analysis.rs
//! Per-participant LSI analysis entry point
//!
//! Reads the four limb tables from the data folder, writes the summary CSV,
//! and renders the representative envelope comparison chart. There are no
//! command-line flags; the data folder is fixed below.

use std::path::Path;
use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Folder holding the four input tables, resolved against the working
/// directory. Make sure this matches your data folder exactly.
const DATA_DIR: &str = "acl90";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match emg_lsi::run_analysis(Path::new(DATA_DIR)) {
        Ok(report) => {
            info!(
                participants = report.participants,
                group_average_lsi = format!("{:.2}", report.mean_peak_lsi),
                summary = %report.summary_path.display(),
                chart = %report.chart_path.display(),
                "analysis finished"
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "analysis aborted");
            ExitCode::FAILURE
        }
    }
}
