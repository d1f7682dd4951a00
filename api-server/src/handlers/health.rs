//! Health check handlers

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;

use crate::AppState;

#[derive(Serialize)]
pub struct HomeResponse {
    message: &'static str,
    version: &'static str,
    timestamp: DateTime<Utc>,
    model_loaded: bool,
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    timestamp: DateTime<Utc>,
    model_loaded: bool,
}

/// Service banner
pub async fn home(State(state): State<AppState>) -> Json<HomeResponse> {
    Json(HomeResponse {
        message: "Image Classifier API is running",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: Utc::now(),
        model_loaded: state.model_loaded,
    })
}

/// Liveness check
pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: Utc::now(),
        model_loaded: state.model_loaded,
    })
}

/// Readiness check: not ready until the model artifact is present
pub async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    if !state.model_loaded {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "not ready", "reason": "Model not loaded" })),
        );
    }

    (
        StatusCode::OK,
        Json(json!({
            "status": "ready",
            "timestamp": Utc::now(),
            "model_loaded": true
        })),
    )
}
