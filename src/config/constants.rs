// src/config/constants.rs
//! System-wide configuration constants
//!
//! Every tunable of the pipeline lives here rather than as an inline literal,
//! so the values can be validated and varied in tests.

/// Envelope extraction constants
pub mod envelope {
    /// Centered moving-average window, in samples
    pub const DEFAULT_SMOOTHING_WINDOW: usize = 100;
    pub const MIN_SMOOTHING_WINDOW: usize = 1;
    pub const MAX_SMOOTHING_WINDOW: usize = 100_000;
}

/// Symmetry classification constants
pub mod symmetry {
    /// Peak LSI below this percentage classifies the limb as deficient
    pub const DEFAULT_DEFICIT_THRESHOLD_PCT: f64 = 90.0;

    /// Decimal places kept for LSI percentages in the summary table
    pub const LSI_ROUND_DECIMALS: u32 = 2;
}

/// Group statistics constants
pub mod stats {
    /// Rows at or above this LSI are treated as measurement artifacts
    pub const DEFAULT_OUTLIER_CUTOFF_PCT: f64 = 200.0;

    /// Two-tailed significance level for the per-speed comparison
    pub const DEFAULT_SIGNIFICANCE_LEVEL: f64 = 0.05;

    /// Minimum per-cohort sample count for a t-test to be attempted
    pub const MIN_GROUP_SIZE: usize = 2;
}

/// Input/output file names, resolved against the data folder
pub mod files {
    pub const INVOLVED_AMPLITUDE: &str = "patient_iso90_inv.csv";
    pub const INVOLVED_TIME: &str = "patient_iso90_inv_time.csv";
    pub const UNINVOLVED_AMPLITUDE: &str = "patient_iso90_uninv.csv";
    pub const UNINVOLVED_TIME: &str = "patient_iso90_uninv_time.csv";

    pub const SUMMARY_OUTPUT: &str = "RESEARCH_SUMMARY_LSI.csv";
    pub const COMPARISON_CHART: &str = "envelope_comparison.png";

    pub const GROUP_RESULTS: &str = "ACL_Research_Results.csv";
    pub const GROUP_CHART: &str = "Final_LSI_Plot.png";

    /// Optional TOML override read from the data folder
    pub const CONFIG_OVERRIDE: &str = "lsi.toml";
}

/// Chart geometry and styling
pub mod chart {
    pub const COMPARISON_WIDTH_PX: u32 = 1200;
    pub const COMPARISON_HEIGHT_PX: u32 = 500;
    pub const GROUP_WIDTH_PX: u32 = 1000;
    pub const GROUP_HEIGHT_PX: u32 = 600;

    /// Alpha of the shaded area under the involved-limb envelope
    pub const FILL_ALPHA: f64 = 0.1;

    /// Upper y-axis bound for the group LSI chart, in percent
    pub const GROUP_Y_MAX_PCT: f64 = 180.0;
}
