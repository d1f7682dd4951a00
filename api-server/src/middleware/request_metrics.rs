//! Request duration middleware

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};

use crate::AppState;

/// Label used for requests that matched no route
const UNMATCHED: &str = "unmatched";

/// Observe every request's duration, labelled by its route template
pub async fn track_duration(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let endpoint = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED.to_string());

    let started = Instant::now();
    let response = next.run(request).await;

    state
        .metrics
        .observe_request(&endpoint, started.elapsed().as_secs_f64());

    response
}
