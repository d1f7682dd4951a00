//! Model Monitor
//!
//! Owns the window store, the baseline manager and the configuration for
//! one served model. Built once at startup and shared by reference with
//! every request handler.

use std::sync::Arc;

use crate::baseline::BaselineManager;
use crate::config::MonitorConfig;
use crate::drift::DriftReport;
use crate::error::MonitorResult;
use crate::observer::PredictionObserver;
use crate::record::PredictionRecord;
use crate::window::{ModelMetrics, WindowStore};

pub struct ModelMonitor {
    config: MonitorConfig,
    window: WindowStore,
    baseline: BaselineManager,
}

impl ModelMonitor {
    pub fn new(config: MonitorConfig) -> MonitorResult<Self> {
        Self::with_observers(config, Vec::new())
    }

    /// Build a monitor whose window publishes to `observers`
    pub fn with_observers(
        config: MonitorConfig,
        observers: Vec<Arc<dyn PredictionObserver>>,
    ) -> MonitorResult<Self> {
        config.validate()?;

        let window = observers
            .into_iter()
            .fold(WindowStore::new(config.window_size), WindowStore::with_observer);

        log::info!(
            "Model monitor initialized: window={}, drift_threshold={}",
            config.window_size,
            config.drift_threshold
        );

        Ok(Self {
            config,
            window,
            baseline: BaselineManager::new(),
        })
    }

    /// Ingest one prediction record. Never fails.
    pub fn record(&self, record: PredictionRecord) {
        self.window.record(record);
    }

    /// Current aggregate metrics
    pub fn metrics(&self) -> ModelMetrics {
        self.window.snapshot()
    }

    pub fn detect_drift(&self) -> DriftReport {
        let baseline = self.baseline.get();
        self.window.detect(baseline.as_ref(), self.config.drift_threshold)
    }

    pub fn set_baseline(&self, baseline: ModelMetrics) {
        self.baseline.set(baseline);
    }

    pub fn baseline(&self) -> Option<ModelMetrics> {
        self.baseline.get()
    }

    /// Snapshot the window and store it as the new baseline
    pub fn capture_baseline(&self) -> ModelMetrics {
        let snapshot = self.metrics();
        self.baseline.set(snapshot.clone());
        snapshot
    }
}
