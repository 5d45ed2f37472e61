// src/symmetry/mod.rs
//! Limb symmetry aggregation across participants
//!
//! Drives the channel processor over every participant column of the
//! involved/uninvolved table pairs, forms the LSI ratios, classifies deficit
//! status, and assembles the summary table. Iteration order and therefore
//! output order is the column order of the involved-limb amplitude table.

use tracing::{debug, info};

use crate::config::{symmetry::LSI_ROUND_DECIMALS, PipelineSettings};
use crate::io::tables::LimbData;
use crate::processing::{ChannelMetrics, ChannelProcessor};

/// One participant's symmetry metrics
#[derive(Debug, Clone)]
pub struct ParticipantRecord {
    /// Column label from the involved-limb amplitude table
    pub participant: String,
    /// Peak-envelope LSI, percent, rounded to 2 decimals
    pub lsi_peak_pct: f64,
    /// Envelope-work LSI, percent, rounded to 2 decimals
    pub lsi_work_pct: f64,
    /// True when peak LSI is strictly below the deficit threshold
    pub deficit: bool,
}

/// Envelope series retained for the comparison chart
#[derive(Debug, Clone)]
pub struct RepresentativeResult {
    pub participant: String,
    pub involved: ChannelMetrics,
    pub uninvolved: ChannelMetrics,
}

/// Aggregation output: records in participant order plus one representative
/// result for visualization
#[derive(Debug, Clone, Default)]
pub struct SummaryTable {
    pub records: Vec<ParticipantRecord>,
    /// Last successfully processed participant, in column order. An explicit
    /// accumulator updated on success, so a reordered or parallel driver
    /// would still have a well-defined representative.
    pub representative: Option<RepresentativeResult>,
}

impl SummaryTable {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Mean peak LSI across all emitted records
    pub fn mean_peak_lsi(&self) -> f64 {
        if self.records.is_empty() {
            return f64::NAN;
        }
        self.records.iter().map(|r| r.lsi_peak_pct).sum::<f64>() / self.records.len() as f64
    }
}

/// Batch driver computing symmetry indices per participant
pub struct SymmetryAggregator {
    processor: ChannelProcessor,
    deficit_threshold_pct: f64,
}

impl SymmetryAggregator {
    pub fn new(settings: &PipelineSettings) -> Self {
        Self {
            processor: ChannelProcessor::new(settings),
            deficit_threshold_pct: settings.deficit_threshold_pct,
        }
    }

    /// Process every participant of the involved table against the matching
    /// uninvolved column.
    ///
    /// The involved amplitude table's column count drives iteration; the
    /// other three tables are joined by position (with the time-column
    /// fallback resolved inside [`LimbData`]). A participant whose either
    /// channel yields no usable samples is skipped without a record.
    ///
    /// A zero peak or work on the uninvolved limb is deliberately not
    /// guarded; the resulting non-finite ratio flows into the record.
    pub fn aggregate(&self, involved: &LimbData, uninvolved: &LimbData) -> SummaryTable {
        let mut summary = SummaryTable::default();

        for i in 0..involved.participant_count() {
            let participant = involved.label(i).to_string();

            let res_inv = self
                .processor
                .process(involved.amplitude_column(i), involved.time_column(i));
            let res_uninv = match uninvolved.column_for(i) {
                Some((amplitude, time)) => self.processor.process(amplitude, time),
                None => None,
            };

            let (res_inv, res_uninv) = match (res_inv, res_uninv) {
                (Some(inv), Some(uninv)) => (inv, uninv),
                _ => {
                    debug!(participant = %participant, "no usable samples on one limb, skipping");
                    continue;
                }
            };

            let lsi_peak = round_pct(100.0 * res_inv.peak / res_uninv.peak);
            let lsi_work = round_pct(100.0 * res_inv.work / res_uninv.work);
            let deficit = lsi_peak < self.deficit_threshold_pct;

            info!(participant = %participant, lsi_peak = lsi_peak, "analysis complete");

            summary.records.push(ParticipantRecord {
                participant: participant.clone(),
                lsi_peak_pct: lsi_peak,
                lsi_work_pct: lsi_work,
                deficit,
            });
            summary.representative = Some(RepresentativeResult {
                participant,
                involved: res_inv,
                uninvolved: res_uninv,
            });
        }

        summary
    }
}

/// Round to the summary table's fixed decimal precision, breaking exact
/// ties toward the even digit.
fn round_pct(value: f64) -> f64 {
    let scale = 10f64.powi(LSI_ROUND_DECIMALS as i32);
    (value * scale).round_ties_even() / scale
}
