//! Prediction Records
//!
//! One immutable, timestamped record per inference attempt. Failed
//! inferences are recorded too, with `success = false` and an error message.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// STATUS
// ============================================================================

/// Outcome label used by the prediction counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionStatus {
    Success,
    Error,
}

impl PredictionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PredictionStatus::Success => "success",
            PredictionStatus::Error => "error",
        }
    }
}

// ============================================================================
// INPUT SIZE
// ============================================================================

/// Dimensions of the image that was classified
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSize {
    pub width: u32,
    pub height: u32,
}

impl InputSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

// ============================================================================
// PREDICTION RECORD
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub timestamp: DateTime<Utc>,
    pub predicted_class: String,
    /// Softmax confidence in [0, 1]
    pub confidence: f64,
    /// Seconds spent on the inference
    pub processing_time: f64,
    pub input_size: InputSize,
    pub success: bool,
    pub error_message: Option<String>,
}

impl PredictionRecord {
    /// Successful prediction stamped with the current time
    pub fn success(predicted_class: &str, confidence: f64, processing_time: f64) -> Self {
        Self {
            timestamp: Utc::now(),
            predicted_class: predicted_class.to_string(),
            confidence,
            processing_time,
            input_size: InputSize::default(),
            success: true,
            error_message: None,
        }
    }

    /// Failed prediction stamped with the current time
    pub fn failure(predicted_class: &str, processing_time: f64, error: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            predicted_class: predicted_class.to_string(),
            confidence: 0.0,
            processing_time,
            input_size: InputSize::default(),
            success: false,
            error_message: Some(error.to_string()),
        }
    }

    pub fn with_input_size(mut self, width: u32, height: u32) -> Self {
        self.input_size = InputSize::new(width, height);
        self
    }

    pub fn status(&self) -> PredictionStatus {
        if self.success {
            PredictionStatus::Success
        } else {
            PredictionStatus::Error
        }
    }
}
