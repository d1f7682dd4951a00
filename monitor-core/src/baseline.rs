//! Baseline Manager
//!
//! Holds the single reference snapshot used by the drift detector.
//! Setting a baseline replaces the previous one wholesale; no history is kept.

use parking_lot::RwLock;

use crate::window::ModelMetrics;

#[derive(Debug, Default)]
pub struct BaselineManager {
    current: RwLock<Option<ModelMetrics>>,
}

impl BaselineManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, baseline: ModelMetrics) {
        log::info!(
            "Baseline set: {} predictions, avg confidence {:.3}, avg processing time {:.4}s",
            baseline.total_predictions,
            baseline.avg_confidence,
            baseline.avg_processing_time
        );
        *self.current.write() = Some(baseline);
    }

    pub fn get(&self) -> Option<ModelMetrics> {
        self.current.read().clone()
    }

    pub fn is_set(&self) -> bool {
        self.current.read().is_some()
    }
}
