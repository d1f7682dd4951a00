//! Class label handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct ClassesResponse {
    classes: Vec<String>,
    count: usize,
}

pub async fn list(State(state): State<AppState>) -> Json<ClassesResponse> {
    Json(ClassesResponse {
        classes: state.classes.to_vec(),
        count: state.classes.len(),
    })
}
