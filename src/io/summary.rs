// src/io/summary.rs
//! Summary table persistence
//!
//! The summary CSV is the sole persisted artifact of the per-participant
//! stage. Each run regenerates it in full; there is no update-in-place.

use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::error::{LsiError, LsiResult};
use crate::symmetry::SummaryTable;

#[derive(Debug, Serialize)]
struct SummaryRow<'a> {
    #[serde(rename = "Participant")]
    participant: &'a str,
    #[serde(rename = "LSI_Peak_%")]
    lsi_peak_pct: f64,
    #[serde(rename = "LSI_Work_%")]
    lsi_work_pct: f64,
    #[serde(rename = "Deficit")]
    deficit: &'a str,
}

/// Write the summary table as CSV, one row per participant, no index column.
pub fn write_summary(path: &Path, summary: &SummaryTable) -> LsiResult<()> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| LsiError::Write {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    for record in &summary.records {
        let row = SummaryRow {
            participant: &record.participant,
            lsi_peak_pct: record.lsi_peak_pct,
            lsi_work_pct: record.lsi_work_pct,
            deficit: if record.deficit { "YES" } else { "NO" },
        };
        writer.serialize(row).map_err(|e| LsiError::Write {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    }

    writer.flush().map_err(|e| LsiError::Write {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    info!(path = %path.display(), rows = summary.records.len(), "summary written");
    Ok(())
}
