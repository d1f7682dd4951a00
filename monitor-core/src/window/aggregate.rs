//! Aggregator - point-in-time summary of the rolling window

use serde::{Deserialize, Serialize};

use super::{ClassDistribution, WindowState};
use crate::constants::RECENT_ERROR_LIMIT;

/// Aggregate metrics over the live window. Recomputed on every query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelMetrics {
    pub total_predictions: usize,
    pub successful_predictions: usize,
    pub failed_predictions: usize,
    /// Mean confidence over successful predictions only
    pub avg_confidence: f64,
    /// Mean processing time over all predictions
    pub avg_processing_time: f64,
    pub class_distribution: ClassDistribution,
    /// Latest error messages, oldest first
    pub recent_errors: Vec<String>,
}

impl ModelMetrics {
    /// Success rate in percent (0.0 for an empty window)
    pub fn success_rate(&self) -> f64 {
        if self.total_predictions == 0 {
            0.0
        } else {
            self.successful_predictions as f64 / self.total_predictions as f64 * 100.0
        }
    }
}

impl WindowState {
    pub fn aggregate(&self) -> ModelMetrics {
        let mut successful = 0usize;
        let mut confidence_sum = 0.0;
        let mut processing_sum = 0.0;
        let mut class_distribution = ClassDistribution::new();

        for record in self.records() {
            processing_sum += record.processing_time;
            *class_distribution
                .entry(record.predicted_class.clone())
                .or_insert(0) += 1;

            if record.success {
                successful += 1;
                confidence_sum += record.confidence;
            }
        }

        let total = self.len();

        let mut recent_errors: Vec<String> = self
            .records()
            .rev()
            .filter(|r| !r.success)
            .filter_map(|r| r.error_message.clone())
            .take(RECENT_ERROR_LIMIT)
            .collect();
        recent_errors.reverse();

        ModelMetrics {
            total_predictions: total,
            successful_predictions: successful,
            failed_predictions: total - successful,
            avg_confidence: mean_or_zero(confidence_sum, successful),
            avg_processing_time: mean_or_zero(processing_sum, total),
            class_distribution,
            recent_errors,
        }
    }
}

fn mean_or_zero(sum: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
