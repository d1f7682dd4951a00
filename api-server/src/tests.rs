use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::*;

fn test_state(window_size: usize) -> AppState {
    let config = config::Config {
        model_path: "/nonexistent/model.pt".into(),
        classes_path: "/nonexistent/classes.txt".into(),
        window_size,
        metrics_namespace: "test".to_string(),
        ..config::Config::default()
    };
    AppState::build(config).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::get(uri).body(Body::empty()).unwrap();
    let (status, body) = send(app, request).await;
    (status, serde_json::from_str(&body).unwrap())
}

async fn post_json(app: &Router, uri: &str, payload: Value) -> (StatusCode, Value) {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    let (status, body) = send(app, request).await;
    (status, serde_json::from_str(&body).unwrap_or(Value::Null))
}

async fn record(app: &Router, class: &str, confidence: f64, times: usize) {
    for _ in 0..times {
        let (status, _) = post_json(
            app,
            "/monitoring/predictions",
            json!({
                "predicted_class": class,
                "confidence": confidence,
                "processing_time": 0.02,
                "input_size": { "width": 32, "height": 32 }
            }),
        )
        .await;
        assert_eq!(status, StatusCode::ACCEPTED);
    }
}

#[tokio::test]
async fn test_health_and_readiness() {
    let app = create_router(test_state(100));

    let (status, body) = get_json(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["model_loaded"], false);

    let (status, body) = get_json(&app, "/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["reason"], "Model not loaded");
}

#[tokio::test]
async fn test_classes_default_to_cifar10() {
    let app = create_router(test_state(100));

    let (status, body) = get_json(&app, "/classes").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 10);
    assert_eq!(body["classes"][9], "truck");
}

#[tokio::test]
async fn test_ingest_and_aggregate() {
    let app = create_router(test_state(100));

    record(&app, "cat", 0.8, 3).await;
    let (status, _) = post_json(
        &app,
        "/monitoring/predictions",
        json!({
            "predicted_class": "dog",
            "confidence": 0.0,
            "processing_time": 0.5,
            "success": false,
            "error_message": "CUDA out of memory"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);

    let (status, body) = get_json(&app, "/monitoring/model").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_predictions"], 4);
    assert_eq!(body["successful_predictions"], 3);
    assert_eq!(body["failed_predictions"], 1);
    assert_eq!(body["class_distribution"]["cat"], 3);
    assert_eq!(body["recent_errors"], json!(["CUDA out of memory"]));
}

#[tokio::test]
async fn test_ingest_rejects_invalid_record() {
    let app = create_router(test_state(100));

    let (status, body) = post_json(
        &app,
        "/monitoring/predictions",
        json!({ "predicted_class": "cat", "confidence": 2.0, "processing_time": 0.1 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);

    let (_, body) = get_json(&app, "/monitoring/model").await;
    assert_eq!(body["total_predictions"], 0);
}

async fn prediction_series(app: &Router) -> usize {
    let request = Request::get("/metrics").body(Body::empty()).unwrap();
    let (_, text) = send(app, request).await;
    text.lines()
        .filter(|l| l.starts_with("test_predictions_total{"))
        .count()
}

#[tokio::test]
async fn test_ingest_rejects_unknown_class() {
    let app = create_router(test_state(10));
    record(&app, "cat", 0.9, 1).await;
    let series_before = prediction_series(&app).await;

    for i in 0..20 {
        let (status, body) = post_json(
            &app,
            "/monitoring/predictions",
            json!({
                "predicted_class": format!("bogus{}", i),
                "confidence": 0.5,
                "processing_time": 0.01
            }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], 400);
    }

    assert_eq!(prediction_series(&app).await, series_before);

    let (_, body) = get_json(&app, "/monitoring/model").await;
    assert_eq!(body["total_predictions"], 1);
    assert!(body["class_distribution"].get("bogus0").is_none());
}

#[tokio::test]
async fn test_drift_workflow() {
    let app = create_router(test_state(1000));

    let (_, body) = get_json(&app, "/monitoring/drift").await;
    assert_eq!(body["drift_detected"], false);
    assert_eq!(body["reason"], "insufficient data");

    let (status, _) = get_json(&app, "/monitoring/baseline").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    record(&app, "cat", 0.9, 60).await;

    let (_, body) = get_json(&app, "/monitoring/drift").await;
    assert_eq!(body["drift_detected"], false);
    assert_eq!(body["confidence_drift"], false);
    assert_eq!(body["baseline_avg_confidence"], Value::Null);

    let (status, body) = post_json(&app, "/monitoring/baseline", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Baseline metrics set");
    assert_eq!(body["baseline"]["class_distribution"]["cat"], 60);

    let (status, body) = get_json(&app, "/monitoring/baseline").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_predictions"], 60);

    record(&app, "cat", 0.5, 50).await;

    let (_, body) = get_json(&app, "/monitoring/drift").await;
    assert_eq!(body["drift_detected"], true);
    assert_eq!(body["confidence_drift"], true);
    assert_eq!(body["class_drift"], false);
}

#[tokio::test]
async fn test_metrics_exposition() {
    let app = create_router(test_state(100));
    record(&app, "ship", 0.7, 2).await;

    let request = Request::get("/metrics").body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/plain; version=0.0.4"
    );

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();

    assert!(text.contains("test_predictions_total{class=\"ship\",status=\"success\"} 2"));
    assert!(text.contains("test_model_loaded 0"));
    assert!(text.contains("endpoint=\"/monitoring/predictions\""));
}

#[tokio::test]
async fn test_unknown_route() {
    let app = create_router(test_state(100));

    let request = Request::get("/nope").body(Body::empty()).unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
