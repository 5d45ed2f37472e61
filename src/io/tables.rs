// src/io/tables.rs
//! Delimited table loading for per-participant limb recordings
//!
//! Input tables are plain CSV with a header row of participant labels and one
//! column per participant. Cells that are empty or non-numeric load as NaN so
//! the channel processor can apply paired removal; rows may be ragged because
//! participants record for different durations.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::{LsiError, LsiResult};

/// A column-oriented table of float samples with header labels
#[derive(Debug, Clone)]
pub struct ColumnTable {
    labels: Vec<String>,
    columns: Vec<Vec<f64>>,
    path: PathBuf,
}

impl ColumnTable {
    /// Load a table from a CSV file. Missing cells become NaN.
    pub fn load(path: &Path) -> LsiResult<Self> {
        let file = std::fs::File::open(path).map_err(|source| LsiError::TableRead {
            path: path.to_path_buf(),
            source,
        })?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        let labels: Vec<String> = reader
            .headers()
            .map_err(|source| LsiError::TableParse {
                path: path.to_path_buf(),
                source,
            })?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut columns: Vec<Vec<f64>> = vec![Vec::new(); labels.len()];
        for record in reader.records() {
            let record = record.map_err(|source| LsiError::TableParse {
                path: path.to_path_buf(),
                source,
            })?;
            for (col, cell) in columns.iter_mut().zip(record.iter().chain(std::iter::repeat(""))) {
                col.push(parse_cell(cell));
            }
        }

        info!(
            path = %path.display(),
            columns = labels.len(),
            rows = columns.first().map_or(0, Vec::len),
            "loaded table"
        );

        Ok(Self {
            labels,
            columns,
            path: path.to_path_buf(),
        })
    }

    /// Build a table in memory, mainly for tests.
    pub fn from_columns(labels: Vec<String>, columns: Vec<Vec<f64>>) -> Self {
        debug_assert_eq!(labels.len(), columns.len());
        Self {
            labels,
            columns,
            path: PathBuf::from("<memory>"),
        }
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn label(&self, index: usize) -> &str {
        &self.labels[index]
    }

    pub fn column(&self, index: usize) -> &[f64] {
        &self.columns[index]
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// One limb's amplitude table joined with its time table.
///
/// Columns are joined by position. A time table narrower than the amplitude
/// table is legal: participants beyond its last column share the FIRST time
/// column, the common case of one shared time axis. The shortfall is
/// validated and logged here at load time rather than discovered mid-loop.
#[derive(Debug, Clone)]
pub struct LimbData {
    amplitude: ColumnTable,
    time: ColumnTable,
}

impl LimbData {
    pub fn new(amplitude: ColumnTable, time: ColumnTable) -> LsiResult<Self> {
        if amplitude.column_count() == 0 {
            return Err(LsiError::ShapeMismatch(format!(
                "amplitude table {} has no columns",
                amplitude.path().display()
            )));
        }
        if time.column_count() == 0 {
            return Err(LsiError::ShapeMismatch(format!(
                "time table {} has no columns",
                time.path().display()
            )));
        }
        if time.column_count() < amplitude.column_count() {
            warn!(
                amplitude_columns = amplitude.column_count(),
                time_columns = time.column_count(),
                "time table narrower than amplitude table; reusing its first column"
            );
        }
        Ok(Self { amplitude, time })
    }

    pub fn load(amplitude_path: &Path, time_path: &Path) -> LsiResult<Self> {
        Self::new(ColumnTable::load(amplitude_path)?, ColumnTable::load(time_path)?)
    }

    pub fn participant_count(&self) -> usize {
        self.amplitude.column_count()
    }

    pub fn label(&self, index: usize) -> &str {
        self.amplitude.label(index)
    }

    pub fn amplitude_column(&self, index: usize) -> &[f64] {
        self.amplitude.column(index)
    }

    /// Time column for participant `index`, falling back to the first column.
    pub fn time_column(&self, index: usize) -> &[f64] {
        if index < self.time.column_count() {
            self.time.column(index)
        } else {
            self.time.column(0)
        }
    }

    /// Amplitude/time pair for participant `index`, or `None` when this
    /// limb's amplitude table has no column at that position. The driving
    /// table may be wider than its partner; those participants are skipped
    /// rather than aborting the batch.
    pub fn column_for(&self, index: usize) -> Option<(&[f64], &[f64])> {
        if index < self.amplitude.column_count() {
            Some((self.amplitude.column(index), self.time_column(index)))
        } else {
            None
        }
    }
}

fn parse_cell(cell: &str) -> f64 {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return f64::NAN;
    }
    trimmed.parse().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "{}", body).unwrap();
        path
    }

    #[test]
    fn test_load_basic_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "amp.csv", "P01,P02\n1.0,2.0\n3.0,4.0\n");
        let table = ColumnTable::load(&path).unwrap();
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.label(0), "P01");
        assert_eq!(table.column(0), &[1.0, 3.0]);
        assert_eq!(table.column(1), &[2.0, 4.0]);
    }

    #[test]
    fn test_missing_cells_load_as_nan() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "amp.csv", "P01,P02\n1.0,\n,4.0\nx,5.0\n");
        let table = ColumnTable::load(&path).unwrap();
        assert!(table.column(1)[0].is_nan());
        assert!(table.column(0)[1].is_nan());
        assert!(table.column(0)[2].is_nan()); // non-numeric cell
        assert_eq!(table.column(1)[2], 5.0);
    }

    #[test]
    fn test_ragged_rows_pad_with_nan() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "amp.csv", "P01,P02\n1.0\n2.0,3.0\n");
        let table = ColumnTable::load(&path).unwrap();
        assert_eq!(table.column(0), &[1.0, 2.0]);
        assert!(table.column(1)[0].is_nan());
        assert_eq!(table.column(1)[1], 3.0);
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let err = ColumnTable::load(Path::new("/nonexistent/amp.csv")).unwrap_err();
        assert!(matches!(err, LsiError::TableRead { .. }));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_time_column_fallback() {
        let amplitude = ColumnTable::from_columns(
            vec!["P01".into(), "P02".into(), "P03".into()],
            vec![vec![1.0], vec![2.0], vec![3.0]],
        );
        let time = ColumnTable::from_columns(vec!["t".into()], vec![vec![0.5]]);
        let limb = LimbData::new(amplitude, time).unwrap();

        for i in 0..3 {
            assert_eq!(limb.time_column(i), &[0.5]);
        }
    }

    #[test]
    fn test_empty_time_table_rejected() {
        let amplitude =
            ColumnTable::from_columns(vec!["P01".into()], vec![vec![1.0]]);
        let time = ColumnTable::from_columns(vec![], vec![]);
        assert!(LimbData::new(amplitude, time).is_err());
    }
}
