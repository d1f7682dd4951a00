//! Prometheus exposition handler

use axum::{extract::State, http::header, response::IntoResponse};

use classifier_monitor::metrics::CONTENT_TYPE;

use crate::{AppResult, AppState};

pub async fn exposition(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let body = state.metrics.render()?;
    Ok(([(header::CONTENT_TYPE, CONTENT_TYPE)], body))
}
