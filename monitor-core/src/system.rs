//! System Monitor
//!
//! Samples process-host resources with sysinfo and mirrors them into the
//! metrics registry. Sampling failures are caught here and surfaced as a
//! structured error payload instead of being propagated.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use sysinfo::System;

use crate::error::{MonitorError, MonitorResult};
use crate::metrics::MetricsRegistry;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemMetrics {
    pub memory_used_bytes: u64,
    pub memory_total_bytes: u64,
    pub memory_percent: f64,
    pub cpu_percent: f32,
    pub uptime_seconds: f64,
    pub timestamp: DateTime<Utc>,
}

/// Either a sample or the reason sampling failed
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum SystemReport {
    Metrics(SystemMetrics),
    Error { error: String },
}

pub struct SystemMonitor {
    started_at: DateTime<Utc>,
    system: Mutex<System>,
    metrics: Option<Arc<MetricsRegistry>>,
}

impl SystemMonitor {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            system: Mutex::new(System::new()),
            metrics: None,
        }
    }

    /// Mirror every sample into the registry's memory/CPU gauges
    pub fn with_registry(mut self, metrics: Arc<MetricsRegistry>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Take one sample. Blocks for the minimum CPU update interval.
    pub fn sample(&self) -> MonitorResult<SystemMetrics> {
        let (used, total) = {
            let mut sys = self.system.lock();
            sys.refresh_memory();
            sys.refresh_cpu();
            (sys.used_memory(), sys.total_memory())
        };

        // Lock released while waiting so concurrent samplers overlap
        std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);

        let cpu_percent = {
            let mut sys = self.system.lock();
            sys.refresh_cpu();
            sys.global_cpu_info().cpu_usage()
        };

        if total == 0 {
            return Err(MonitorError::SystemSampling(
                "memory information unavailable".to_string(),
            ));
        }

        let now = Utc::now();
        let sample = SystemMetrics {
            memory_used_bytes: used,
            memory_total_bytes: total,
            memory_percent: used as f64 / total as f64 * 100.0,
            cpu_percent,
            uptime_seconds: (now - self.started_at).num_milliseconds() as f64 / 1000.0,
            timestamp: now,
        };

        if let Some(metrics) = &self.metrics {
            metrics.observe_system(&sample);
        }

        Ok(sample)
    }

    /// Sample, converting failures into an error payload
    pub fn report(&self) -> SystemReport {
        match self.sample() {
            Ok(sample) => SystemReport::Metrics(sample),
            Err(e) => {
                log::error!("Error getting system metrics: {}", e);
                SystemReport::Error { error: e.to_string() }
            }
        }
    }
}

impl Default for SystemMonitor {
    fn default() -> Self {
        Self::new()
    }
}
