// src/bin/group_stats.rs
//! Group-level statistical comparison entry point
//!
//! Consumes the long-format research table, screens outliers, compares
//! patient and healthy cohorts per speed condition, and renders the grouped
//! LSI chart. No command-line flags; the data folder is fixed below.

use std::path::Path;
use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Folder holding the long-format results table, resolved against the
/// working directory.
const DATA_DIR: &str = "acl90";

/// Two-tailed significance level used for the printed verdict.
const ALPHA: f64 = 0.05;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match emg_lsi::run_group_analysis(Path::new(DATA_DIR)) {
        Ok(comparisons) => {
            for c in &comparisons {
                match c.test {
                    Some(test) => info!(
                        speed = %c.speed,
                        patient_mean = format!("{:.2}", c.patient_mean),
                        healthy_mean = format!("{:.2}", c.healthy_mean),
                        p_value = format!("{:.4}", test.p_value),
                        verdict = if test.p_value < ALPHA {
                            "significant"
                        } else {
                            "not significant"
                        },
                        "speed condition"
                    ),
                    None => info!(speed = %c.speed, "insufficient data for a t-test"),
                }
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "group analysis aborted");
            ExitCode::FAILURE
        }
    }
}
