//! Drift Detector
//!
//! Threshold heuristic comparing the live window against a captured
//! baseline on three independent signals:
//! 1. mean confidence of the latest predictions
//! 2. mean processing time of the latest predictions
//! 3. per-class share in the latest distribution snapshot
//!
//! Any signal whose absolute difference exceeds the threshold fires.
//! A missing baseline silences all three signals.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{reasons, DRIFT_RECENT_SAMPLES, MIN_DRIFT_SAMPLES};
use crate::window::{ClassDistribution, ModelMetrics, WindowState};

// ============================================================================
// REPORT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftReport {
    pub drift_detected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(flatten)]
    pub signals: Option<DriftSignals>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftSignals {
    pub confidence_drift: bool,
    pub processing_drift: bool,
    pub class_drift: bool,
    pub current_avg_confidence: f64,
    pub current_avg_processing_time: f64,
    pub baseline_avg_confidence: Option<f64>,
    pub baseline_avg_processing_time: Option<f64>,
    /// First class (in label order) whose share moved past the threshold
    pub drifted_class: Option<String>,
}

impl DriftReport {
    pub fn insufficient_data() -> Self {
        Self {
            drift_detected: false,
            reason: Some(reasons::INSUFFICIENT_DATA.to_string()),
            signals: None,
            timestamp: Utc::now(),
        }
    }

    pub fn confidence_drift(&self) -> bool {
        self.signals.as_ref().map_or(false, |s| s.confidence_drift)
    }

    pub fn processing_drift(&self) -> bool {
        self.signals.as_ref().map_or(false, |s| s.processing_drift)
    }

    pub fn class_drift(&self) -> bool {
        self.signals.as_ref().map_or(false, |s| s.class_drift)
    }
}

// ============================================================================
// EVALUATION
// ============================================================================

/// Evaluate drift for a locked window state
pub fn evaluate(state: &WindowState, baseline: Option<&ModelMetrics>, threshold: f64) -> DriftReport {
    if state.len() < MIN_DRIFT_SAMPLES {
        return DriftReport::insufficient_data();
    }

    let current_avg_confidence = mean(&state.recent_confidences(DRIFT_RECENT_SAMPLES));
    let current_avg_processing_time = mean(&state.recent_processing_times(DRIFT_RECENT_SAMPLES));

    let confidence_drift = baseline.map_or(false, |b| {
        (current_avg_confidence - b.avg_confidence).abs() > threshold
    });
    let processing_drift = baseline.map_or(false, |b| {
        (current_avg_processing_time - b.avg_processing_time).abs() > threshold
    });

    let drifted_class = match (baseline, state.latest_distribution()) {
        (Some(b), Some(recent)) => find_class_drift(recent, &b.class_distribution, threshold),
        _ => None,
    };
    let class_drift = drifted_class.is_some();

    let drift_detected = confidence_drift || processing_drift || class_drift;
    if drift_detected {
        log::warn!(
            "Model drift detected: confidence={} processing={} class={:?}",
            confidence_drift,
            processing_drift,
            drifted_class
        );
    }

    DriftReport {
        drift_detected,
        reason: baseline.is_none().then(|| reasons::NO_BASELINE.to_string()),
        signals: Some(DriftSignals {
            confidence_drift,
            processing_drift,
            class_drift,
            current_avg_confidence,
            current_avg_processing_time,
            baseline_avg_confidence: baseline.map(|b| b.avg_confidence),
            baseline_avg_processing_time: baseline.map(|b| b.avg_processing_time),
            drifted_class,
        }),
        timestamp: Utc::now(),
    }
}

/// First class of `recent` whose share differs from the baseline share by more than `threshold`
fn find_class_drift(
    recent: &ClassDistribution,
    baseline: &ClassDistribution,
    threshold: f64,
) -> Option<String> {
    let baseline_total: u64 = baseline.values().sum();
    let recent_total: u64 = recent.values().sum();
    if baseline_total == 0 || recent_total == 0 {
        return None;
    }

    recent.iter().find_map(|(class, &count)| {
        let recent_ratio = count as f64 / recent_total as f64;
        let baseline_ratio =
            baseline.get(class).copied().unwrap_or(0) as f64 / baseline_total as f64;

        ((recent_ratio - baseline_ratio).abs() > threshold).then(|| class.clone())
    })
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}
