// src/processing/envelope.rs
//! Channel processing: cleaning, rectification, and linear envelope extraction
//!
//! One call handles one limb channel for one participant. The raw column is
//! paired with its time column by position, missing entries are dropped as
//! pairs, the signal is rectified and smoothed with a centered moving
//! average, and peak/work metrics are read off the resulting envelope.
//!
//! Boundary semantics of the smoother are part of the numerical contract:
//! positions within half a window of either end have no full window and are
//! defined as zero. Partial-window averages or edge clamping would change
//! every downstream LSI value.

use crate::config::PipelineSettings;
use crate::processing::quadrature;

/// Metrics and series produced from one channel
#[derive(Debug, Clone)]
pub struct ChannelMetrics {
    /// Maximum of the smoothed envelope, volts
    pub peak: f64,
    /// Definite integral of the envelope over the time axis, volt-seconds
    pub work: f64,
    /// Smoothed rectified amplitude, one value per surviving sample
    pub envelope: Vec<f64>,
    /// Time axis matching `envelope`, seconds
    pub time: Vec<f64>,
}

/// Envelope extractor with a fixed smoothing window
#[derive(Debug, Clone)]
pub struct ChannelProcessor {
    window: usize,
}

impl ChannelProcessor {
    pub fn new(settings: &PipelineSettings) -> Self {
        Self {
            window: settings.smoothing_window,
        }
    }

    /// Create a processor with an explicit window width, mainly for tests.
    pub fn with_window(window: usize) -> Self {
        Self { window }
    }

    /// Process one channel; `None` means no usable samples survived cleaning.
    ///
    /// Amplitude and time are paired by position; the shorter input bounds
    /// the pairing. A pair is dropped when either value is NaN (missing cell
    /// in the source table).
    pub fn process(&self, amplitude: &[f64], time: &[f64]) -> Option<ChannelMetrics> {
        let (sig, t) = clean(amplitude, time);
        if sig.is_empty() {
            return None;
        }

        let rectified: Vec<f64> = sig.iter().map(|v| v.abs()).collect();
        let envelope = centered_moving_average(&rectified, self.window);

        let peak = envelope.iter().cloned().fold(0.0f64, f64::max);
        let work = quadrature::simpson(&envelope, &t);

        Some(ChannelMetrics {
            peak,
            work,
            envelope,
            time: t,
        })
    }
}

/// Drop positionally-paired entries where either value is missing.
fn clean(amplitude: &[f64], time: &[f64]) -> (Vec<f64>, Vec<f64>) {
    amplitude
        .iter()
        .zip(time.iter())
        .filter(|(s, t)| !s.is_nan() && !t.is_nan())
        .map(|(&s, &t)| (s, t))
        .unzip()
}

/// Centered moving average with zero at positions lacking a full window.
///
/// Window placement matches a label-centered rolling mean over trailing
/// windows shifted by `(w - 1) / 2`: the value at index `i` averages indices
/// `[i - lag, i + lead]` with `lead = (w - 1) / 2` and `lag = w - 1 - lead`.
/// Even windows therefore lean one sample into the past.
fn centered_moving_average(data: &[f64], window: usize) -> Vec<f64> {
    let n = data.len();
    if window == 0 || window > n {
        return vec![0.0; n];
    }

    let lead = (window - 1) / 2;
    let lag = window - 1 - lead;

    // Prefix sums keep the smoother linear in the series length.
    let mut prefix = Vec::with_capacity(n + 1);
    prefix.push(0.0);
    let mut acc = 0.0;
    for &v in data {
        acc += v;
        prefix.push(acc);
    }

    (0..n)
        .map(|i| {
            if i >= lag && i + lead < n {
                (prefix[i + lead + 1] - prefix[i - lag]) / window as f64
            } else {
                0.0
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    fn time_axis(n: usize, dt: f64) -> Vec<f64> {
        (0..n).map(|i| i as f64 * dt).collect()
    }

    #[test]
    fn test_all_missing_returns_none() {
        let processor = ChannelProcessor::with_window(100);
        let amplitude = vec![f64::NAN; 10];
        let time = time_axis(10, 0.001);
        assert!(processor.process(&amplitude, &time).is_none());
    }

    #[test]
    fn test_empty_input_returns_none() {
        let processor = ChannelProcessor::with_window(100);
        assert!(processor.process(&[], &[]).is_none());
    }

    #[test]
    fn test_paired_removal_keeps_alignment() {
        let processor = ChannelProcessor::with_window(1);
        let amplitude = vec![1.0, f64::NAN, 3.0, -4.0];
        let time = vec![0.0, 0.1, 0.2, 0.3];
        let result = processor.process(&amplitude, &time).unwrap();
        assert_eq!(result.envelope.len(), 3);
        assert_eq!(result.time, vec![0.0, 0.2, 0.3]);
        // Window of 1 leaves the rectified signal untouched.
        assert_eq!(result.envelope, vec![1.0, 3.0, 4.0]);
    }

    #[test]
    fn test_missing_time_drops_pair() {
        let processor = ChannelProcessor::with_window(1);
        let amplitude = vec![1.0, 2.0, 3.0];
        let time = vec![0.0, f64::NAN, 0.2];
        let result = processor.process(&amplitude, &time).unwrap();
        assert_eq!(result.envelope, vec![1.0, 3.0]);
    }

    #[test]
    fn test_all_zero_channel_has_zero_metrics() {
        let processor = ChannelProcessor::with_window(10);
        let amplitude = vec![0.0; 200];
        let time = time_axis(200, 0.001);
        let result = processor.process(&amplitude, &time).unwrap();
        assert_eq!(result.peak, 0.0);
        assert_eq!(result.work, 0.0);
    }

    #[test]
    fn test_window_wider_than_series_zeroes_envelope() {
        let processor = ChannelProcessor::with_window(100);
        let amplitude = vec![1.0; 5];
        let time = time_axis(5, 0.01);
        let result = processor.process(&amplitude, &time).unwrap();
        assert!(result.envelope.iter().all(|&v| v == 0.0));
        assert_eq!(result.peak, 0.0);
        assert_eq!(result.work, 0.0);
    }

    #[test]
    fn test_constant_signal_interior_equals_constant() {
        let n = 500;
        let window = 100;
        let c = 2.5;
        let processor = ChannelProcessor::with_window(window);
        let amplitude = vec![-c; n]; // negative; rectification flips it
        let time = time_axis(n, 0.001);
        let result = processor.process(&amplitude, &time).unwrap();

        let lead = (window - 1) / 2;
        let lag = window - 1 - lead;
        for i in lag..(n - lead) {
            assert!((result.envelope[i] - c).abs() < TOL, "index {}", i);
        }
        // Boundary positions without a full window are defined as zero.
        assert_eq!(result.envelope[0], 0.0);
        assert_eq!(result.envelope[n - 1], 0.0);
        assert!((result.peak - c).abs() < TOL);
    }

    #[test]
    fn test_constant_work_approximates_c_times_duration() {
        // Long series so the zeroed boundary contributes little.
        let n = 10_000;
        let window = 100;
        let c = 1.0;
        let dt = 0.001;
        let processor = ChannelProcessor::with_window(window);
        let amplitude = vec![c; n];
        let time = time_axis(n, dt);
        let result = processor.process(&amplitude, &time).unwrap();

        let duration = (n - 1) as f64 * dt;
        // Boundary zeros shave off roughly one window's worth of area.
        let expected = c * duration;
        assert!((result.work - expected).abs() < c * (window as f64 * dt) * 1.5);
        assert!(result.work > 0.0);
    }

    #[test]
    fn test_even_window_leans_backward() {
        // A centered even window keeps its extra sample on the past side:
        // window 2 averages [i-1, i], so the FIRST position lacks a full
        // window, not the last.
        let env = centered_moving_average(&[1.0, 2.0, 3.0], 2);
        assert_eq!(env, vec![0.0, 1.5, 2.5]);

        // Window 4 at index i covers [i-2, i+1].
        let env = centered_moving_average(&[1.0, 2.0, 3.0, 4.0, 5.0], 4);
        assert_eq!(env, vec![0.0, 0.0, 2.5, 3.5, 0.0]);
    }

    #[test]
    fn test_odd_window_is_symmetric() {
        let env = centered_moving_average(&[3.0, 6.0, 9.0], 3);
        assert_eq!(env, vec![0.0, 6.0, 0.0]);
    }

    #[test]
    fn test_length_shorter_of_two_inputs() {
        let processor = ChannelProcessor::with_window(1);
        let amplitude = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let time = vec![0.0, 0.1, 0.2];
        let result = processor.process(&amplitude, &time).unwrap();
        assert_eq!(result.envelope.len(), 3);
    }
}
