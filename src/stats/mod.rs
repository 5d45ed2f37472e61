// src/stats/mod.rs
//! Group-level statistical comparison of aggregated LSI results
//!
//! Consumes the long-format research table (`LSI`, `Speed`, `Cohort`), screens
//! out implausible measurements, and runs a two-sample Student's t-test per
//! speed condition between the patient and healthy cohorts. P-values come
//! from the Student's t-distribution CDF via the statrs crate.

use std::path::Path;

use serde::Deserialize;
use statrs::distribution::{ContinuousCDF, StudentsT};
use tracing::{info, warn};

use crate::config::{stats::MIN_GROUP_SIZE, StatsSettings};
use crate::error::{LsiError, LsiResult};

/// Cohort membership in the long-format results table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Cohort {
    Patient,
    Healthy,
    /// Unrecognised cohort label. Rows carrying one still load, but they
    /// match neither group and drop out of comparisons and charts.
    #[serde(other)]
    Other,
}

/// One row of the long-format results table
#[derive(Debug, Clone, Deserialize)]
pub struct GroupRow {
    #[serde(rename = "LSI")]
    pub lsi: f64,
    #[serde(rename = "Speed")]
    pub speed: String,
    #[serde(rename = "Cohort")]
    pub cohort: Cohort,
}

/// Per-speed comparison between cohorts
#[derive(Debug, Clone)]
pub struct SpeedComparison {
    pub speed: String,
    pub patient_mean: f64,
    pub healthy_mean: f64,
    pub patient_n: usize,
    pub healthy_n: usize,
    /// Test statistic and two-tailed p-value; `None` when either cohort is
    /// too small for the test.
    pub test: Option<TTestResult>,
}

/// Pooled-variance two-sample t-test result
#[derive(Debug, Clone, Copy)]
pub struct TTestResult {
    pub t_statistic: f64,
    pub p_value: f64,
}

impl SpeedComparison {
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.test.map_or(false, |t| t.p_value < alpha)
    }
}

/// Load the long-format results table.
pub fn load_group_results(path: &Path) -> LsiResult<Vec<GroupRow>> {
    let file = std::fs::File::open(path).map_err(|source| LsiError::TableRead {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(file);

    let mut rows = Vec::new();
    for record in reader.deserialize() {
        let row: GroupRow = record.map_err(|source| LsiError::TableParse {
            path: path.to_path_buf(),
            source,
        })?;
        rows.push(row);
    }

    info!(path = %path.display(), rows = rows.len(), "loaded group results");
    Ok(rows)
}

/// Drop rows at or above the outlier cutoff (slipped electrodes, noise).
pub fn filter_outliers(rows: Vec<GroupRow>, cutoff_pct: f64) -> Vec<GroupRow> {
    let before = rows.len();
    let kept: Vec<GroupRow> = rows.into_iter().filter(|r| r.lsi < cutoff_pct).collect();
    if kept.len() < before {
        info!(
            removed = before - kept.len(),
            cutoff_pct, "excluded outlier measurements"
        );
    }
    kept
}

/// Compare cohorts per speed condition, in first-appearance order of speeds.
pub fn compare_by_speed(rows: &[GroupRow], settings: &StatsSettings) -> Vec<SpeedComparison> {
    let mut speeds: Vec<&str> = Vec::new();
    for row in rows {
        if !speeds.contains(&row.speed.as_str()) {
            speeds.push(row.speed.as_str());
        }
    }

    speeds
        .iter()
        .map(|&speed| {
            let patients: Vec<f64> = rows
                .iter()
                .filter(|r| r.speed == speed && r.cohort == Cohort::Patient)
                .map(|r| r.lsi)
                .collect();
            let healthy: Vec<f64> = rows
                .iter()
                .filter(|r| r.speed == speed && r.cohort == Cohort::Healthy)
                .map(|r| r.lsi)
                .collect();

            let test = two_sample_t_test(&patients, &healthy);
            if test.is_none() {
                warn!(speed = %speed, "cohort too small for a t-test");
            }

            let comparison = SpeedComparison {
                speed: speed.to_string(),
                patient_mean: mean(&patients),
                healthy_mean: mean(&healthy),
                patient_n: patients.len(),
                healthy_n: healthy.len(),
                test,
            };

            if let Some(t) = comparison.test {
                info!(
                    speed = %speed,
                    patient_mean = comparison.patient_mean,
                    healthy_mean = comparison.healthy_mean,
                    p_value = t.p_value,
                    significant = comparison.is_significant(settings.significance_level),
                    "speed condition compared"
                );
            }

            comparison
        })
        .collect()
}

/// Pooled-variance (Student's) two-sample t-test, two-tailed.
///
/// Matches the equal-variance form: the pooled variance weights each sample
/// variance by its degrees of freedom, and the statistic is referred to a
/// t-distribution with n1 + n2 - 2 degrees of freedom.
pub fn two_sample_t_test(a: &[f64], b: &[f64]) -> Option<TTestResult> {
    let (n1, n2) = (a.len(), b.len());
    if n1 < MIN_GROUP_SIZE || n2 < MIN_GROUP_SIZE {
        return None;
    }

    let (m1, m2) = (mean(a), mean(b));
    let (v1, v2) = (sample_variance(a, m1), sample_variance(b, m2));

    let df = (n1 + n2 - 2) as f64;
    let pooled = ((n1 - 1) as f64 * v1 + (n2 - 1) as f64 * v2) / df;
    let denom = (pooled * (1.0 / n1 as f64 + 1.0 / n2 as f64)).sqrt();
    if denom == 0.0 {
        return None;
    }

    let t_statistic = (m1 - m2) / denom;
    let p_value = match StudentsT::new(0.0, 1.0, df) {
        Ok(dist) => 2.0 * (1.0 - dist.cdf(t_statistic.abs())),
        Err(_) => return None,
    };

    Some(TTestResult {
        t_statistic,
        p_value,
    })
}

fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return f64::NAN;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

fn sample_variance(data: &[f64], mean: f64) -> f64 {
    if data.len() < 2 {
        return 0.0;
    }
    data.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / (data.len() - 1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(lsi: f64, speed: &str, cohort: Cohort) -> GroupRow {
        GroupRow {
            lsi,
            speed: speed.to_string(),
            cohort,
        }
    }

    #[test]
    fn test_unknown_cohort_loads_but_is_excluded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");
        std::fs::write(
            &path,
            "LSI,Speed,Cohort\n\
             80.0,1.5,Patient\n\
             85.0,1.5,Patient\n\
             95.0,1.5,Control\n\
             98.0,1.5,Healthy\n\
             99.0,1.5,Healthy\n",
        )
        .unwrap();

        let rows = load_group_results(&path).unwrap();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[2].cohort, Cohort::Other);

        // The foreign row belongs to neither group.
        let comparisons = compare_by_speed(&rows, &StatsSettings::default());
        assert_eq!(comparisons.len(), 1);
        assert_eq!(comparisons[0].patient_n, 2);
        assert_eq!(comparisons[0].healthy_n, 2);
    }

    #[test]
    fn test_outlier_cutoff_is_inclusive() {
        let rows = vec![
            row(199.99, "1.5", Cohort::Patient),
            row(200.0, "1.5", Cohort::Patient),
            row(250.0, "1.5", Cohort::Healthy),
        ];
        let kept = filter_outliers(rows, 200.0);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].lsi, 199.99);
    }

    #[test]
    fn test_t_test_hand_checked() {
        // Pooled variance 2.5, t = -1 exactly, df = 8: p = 0.346594.
        let a = [1.0, 2.0, 3.0, 4.0, 5.0];
        let b = [2.0, 3.0, 4.0, 5.0, 6.0];
        let result = two_sample_t_test(&a, &b).unwrap();
        assert!((result.t_statistic + 1.0).abs() < 1e-12);
        assert!((result.p_value - 0.346594).abs() < 1e-4);
    }

    #[test]
    fn test_t_test_identical_groups_not_significant() {
        let a = [100.0, 101.0, 99.0, 100.5];
        let result = two_sample_t_test(&a, &a).unwrap();
        assert!(result.t_statistic.abs() < 1e-12);
        assert!((result.p_value - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_t_test_rejects_tiny_groups() {
        assert!(two_sample_t_test(&[1.0], &[1.0, 2.0]).is_none());
        assert!(two_sample_t_test(&[], &[]).is_none());
    }

    #[test]
    fn test_t_test_zero_variance_degenerate() {
        assert!(two_sample_t_test(&[5.0, 5.0], &[5.0, 5.0]).is_none());
    }

    #[test]
    fn test_compare_preserves_speed_order() {
        let rows = vec![
            row(80.0, "2.0", Cohort::Patient),
            row(95.0, "1.5", Cohort::Healthy),
            row(85.0, "2.0", Cohort::Patient),
            row(98.0, "2.0", Cohort::Healthy),
            row(97.0, "2.0", Cohort::Healthy),
            row(82.0, "1.5", Cohort::Patient),
        ];
        let comparisons = compare_by_speed(&rows, &StatsSettings::default());
        let speeds: Vec<&str> = comparisons.iter().map(|c| c.speed.as_str()).collect();
        assert_eq!(speeds, vec!["2.0", "1.5"]);
    }

    #[test]
    fn test_comparison_group_means() {
        let rows = vec![
            row(80.0, "1.5", Cohort::Patient),
            row(90.0, "1.5", Cohort::Patient),
            row(100.0, "1.5", Cohort::Healthy),
            row(110.0, "1.5", Cohort::Healthy),
        ];
        let comparisons = compare_by_speed(&rows, &StatsSettings::default());
        assert_eq!(comparisons.len(), 1);
        assert_eq!(comparisons[0].patient_mean, 85.0);
        assert_eq!(comparisons[0].healthy_mean, 105.0);
        assert_eq!(comparisons[0].patient_n, 2);
        assert_eq!(comparisons[0].healthy_n, 2);
    }
}
