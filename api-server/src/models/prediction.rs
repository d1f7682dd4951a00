//! Prediction ingestion model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use classifier_monitor::{InputSize, PredictionRecord};

/// One inference attempt reported by the serving layer
#[derive(Debug, Deserialize, Validate)]
pub struct RecordPredictionRequest {
    /// Defaults to the time of ingestion
    pub timestamp: Option<DateTime<Utc>>,

    #[validate(length(min = 1, max = 128))]
    pub predicted_class: String,

    #[validate(range(min = 0.0, max = 1.0))]
    pub confidence: f64,

    #[validate(range(min = 0.0))]
    pub processing_time: f64,

    #[serde(default)]
    pub input_size: InputSize,

    #[serde(default = "default_success")]
    pub success: bool,

    pub error_message: Option<String>,
}

fn default_success() -> bool {
    true
}

impl From<RecordPredictionRequest> for PredictionRecord {
    fn from(req: RecordPredictionRequest) -> Self {
        PredictionRecord {
            timestamp: req.timestamp.unwrap_or_else(Utc::now),
            predicted_class: req.predicted_class,
            confidence: req.confidence,
            processing_time: req.processing_time,
            input_size: req.input_size,
            success: req.success,
            error_message: req.error_message,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecordPredictionResponse {
    pub accepted: bool,
    pub server_time: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: serde_json::Value) -> RecordPredictionRequest {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_defaults_applied() {
        let req = request(serde_json::json!({
            "predicted_class": "cat",
            "confidence": 0.93,
            "processing_time": 0.012
        }));
        assert!(req.validate().is_ok());

        let record = PredictionRecord::from(req);
        assert!(record.success);
        assert_eq!(record.input_size, InputSize::default());
        assert!(record.error_message.is_none());
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        let req = request(serde_json::json!({
            "predicted_class": "cat",
            "confidence": 1.5,
            "processing_time": -1.0
        }));
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();

        assert!(fields.contains_key("confidence"));
        assert!(fields.contains_key("processing_time"));
    }

    #[test]
    fn test_rejects_empty_class() {
        let req = request(serde_json::json!({
            "predicted_class": "",
            "confidence": 0.5,
            "processing_time": 0.1
        }));
        assert!(req.validate().is_err());
    }
}
