//! Baseline model

use serde::Serialize;

use classifier_monitor::{ClassDistribution, ModelMetrics};

/// The parts of a captured baseline echoed back for confirmation
#[derive(Debug, Serialize)]
pub struct BaselineSummary {
    pub avg_confidence: f64,
    pub avg_processing_time: f64,
    pub class_distribution: ClassDistribution,
}

impl From<&ModelMetrics> for BaselineSummary {
    fn from(metrics: &ModelMetrics) -> Self {
        Self {
            avg_confidence: metrics.avg_confidence,
            avg_processing_time: metrics.avg_processing_time,
            class_distribution: metrics.class_distribution.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SetBaselineResponse {
    pub message: &'static str,
    pub baseline: BaselineSummary,
}
