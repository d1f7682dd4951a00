//! Monitoring handlers

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use validator::Validate;

use classifier_monitor::{DriftReport, ModelMetrics, PredictionRecord, SystemReport};

use crate::{AppError, AppResult, AppState};
use crate::models::{
    BaselineSummary, RecordPredictionRequest, RecordPredictionResponse, SetBaselineResponse,
};

/// Ingest one prediction record from the inference workers
pub async fn record_prediction(
    State(state): State<AppState>,
    Json(req): Json<RecordPredictionRequest>,
) -> AppResult<(StatusCode, Json<RecordPredictionResponse>)> {
    req.validate()?;

    // Labels become metric series; only known classes are accepted
    if !state.classes.iter().any(|c| c == &req.predicted_class) {
        return Err(AppError::ValidationError(format!(
            "Unknown class '{}'",
            req.predicted_class
        )));
    }

    let record = PredictionRecord::from(req);
    if !record.success {
        tracing::warn!(
            "Prediction failed: {}",
            record.error_message.as_deref().unwrap_or("unknown error")
        );
    }
    state.monitor.record(record);

    Ok((
        StatusCode::ACCEPTED,
        Json(RecordPredictionResponse {
            accepted: true,
            server_time: Utc::now().timestamp(),
        }),
    ))
}

/// Aggregate metrics over the rolling window
pub async fn model_metrics(State(state): State<AppState>) -> Json<ModelMetrics> {
    Json(state.monitor.metrics())
}

/// Host resource usage
pub async fn system_metrics(State(state): State<AppState>) -> AppResult<Json<SystemReport>> {
    let system = state.system.clone();
    let report = tokio::task::spawn_blocking(move || system.report()).await?;
    Ok(Json(report))
}

pub async fn drift(State(state): State<AppState>) -> Json<DriftReport> {
    Json(state.monitor.detect_drift())
}

/// Capture the current window as the new baseline
pub async fn set_baseline(State(state): State<AppState>) -> Json<SetBaselineResponse> {
    let baseline = state.monitor.capture_baseline();
    tracing::info!(
        "Baseline captured from {} predictions",
        baseline.total_predictions
    );

    Json(SetBaselineResponse {
        message: "Baseline metrics set",
        baseline: BaselineSummary::from(&baseline),
    })
}

pub async fn get_baseline(State(state): State<AppState>) -> AppResult<Json<ModelMetrics>> {
    state
        .monitor
        .baseline()
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No baseline set".to_string()))
}
