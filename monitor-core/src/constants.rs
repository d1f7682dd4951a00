//! Central Monitoring Constants
//!
//! Single source of truth for the defaults used by the window store and
//! the drift detector.

/// Default number of predictions kept in the rolling window
pub const DEFAULT_WINDOW_SIZE: usize = 1000;

/// Default absolute-difference threshold for every drift signal
pub const DEFAULT_DRIFT_THRESHOLD: f64 = 0.1;

/// Records required in the window before drift is evaluated
pub const MIN_DRIFT_SAMPLES: usize = 50;

/// Most recent confidences / processing times compared against the baseline
pub const DRIFT_RECENT_SAMPLES: usize = 100;

/// Error messages kept in a metrics snapshot
pub const RECENT_ERROR_LIMIT: usize = 10;

/// Default metric namespace (`<ns>_predictions_total`, ...)
pub const DEFAULT_METRICS_NAMESPACE: &str = "cifar10";

/// Drift report reasons
pub mod reasons {
    pub const INSUFFICIENT_DATA: &str = "insufficient data";
    pub const NO_BASELINE: &str = "no baseline set";
}
