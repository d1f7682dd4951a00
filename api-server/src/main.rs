//! Image Classifier Monitoring API Server
//!
//! HTTP surface for the prediction monitoring engine.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  CLASSIFIER MONITORING API                  │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌──────────────┐  ┌──────────────────────┐ │
//! │  │ Inference │  │  Operators   │  │  Prometheus scraper  │ │
//! │  │ workers   │  │  (baseline,  │  │  (/metrics)          │ │
//! │  │           │  │   drift)     │  │                      │ │
//! │  └─────┬─────┘  └──────┬───────┘  └──────────┬───────────┘ │
//! │        └───────────────┼─────────────────────┘             │
//! │                        ▼                                    │
//! │               ┌─────────────────┐                          │
//! │               │  ModelMonitor   │──▶ MetricsRegistry       │
//! │               └─────────────────┘                          │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod handlers;
mod middleware;
mod models;
#[cfg(test)]
mod tests;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    routing::{get, post},
    middleware as axum_middleware,
};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use classifier_monitor::{MetricsRegistry, ModelMonitor, PredictionObserver, SystemMonitor};

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "classifier_api=debug,classifier_monitor=info,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    tracing::info!("Classifier monitoring API starting ({})...", config.environment);

    let state = AppState::build(config)?;
    if state.model_loaded {
        tracing::info!("Model artifact found at {:?}", state.config.model_path);
    } else if state.config.is_production() {
        tracing::error!("Model artifact missing at {:?}, readiness will fail", state.config.model_path);
    } else {
        tracing::warn!("Model artifact missing at {:?}, readiness will fail", state.config.model_path);
    }

    let addr: SocketAddr = format!("{}:{}", state.config.host, state.config.port)
        .parse()
        .context("Invalid API_HOST/API_PORT")?;

    // Build router
    let app = create_router(state);

    // Start server
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub monitor: Arc<ModelMonitor>,
    pub metrics: Arc<MetricsRegistry>,
    pub system: Arc<SystemMonitor>,
    pub classes: Arc<[String]>,
    pub model_loaded: bool,
    pub config: config::Config,
}

impl AppState {
    /// Wire the registry, monitors and static data for one process
    pub fn build(config: config::Config) -> Result<Self, classifier_monitor::MonitorError> {
        let metrics = Arc::new(MetricsRegistry::new(&config.metrics_namespace)?);
        let monitor = ModelMonitor::with_observers(
            config.monitor_config(),
            vec![metrics.clone() as Arc<dyn PredictionObserver>],
        )?;
        let system = SystemMonitor::new().with_registry(metrics.clone());

        let model_loaded = config.model_available();
        metrics.set_model_loaded(model_loaded);

        Ok(Self {
            monitor: Arc::new(monitor),
            metrics,
            system: Arc::new(system),
            classes: config.load_classes().into(),
            model_loaded,
            config,
        })
    }
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    // Health and service info
    let public_routes = Router::new()
        .route("/", get(handlers::health::home))
        .route("/health", get(handlers::health::check))
        .route("/ready", get(handlers::health::ready))
        .route("/classes", get(handlers::classes::list))
        .route("/metrics", get(handlers::metrics::exposition));

    // Monitoring routes
    let monitoring_routes = Router::new()
        .route("/monitoring/predictions", post(handlers::monitoring::record_prediction))
        .route("/monitoring/model", get(handlers::monitoring::model_metrics))
        .route("/monitoring/system", get(handlers::monitoring::system_metrics))
        .route("/monitoring/drift", get(handlers::monitoring::drift))
        .route(
            "/monitoring/baseline",
            get(handlers::monitoring::get_baseline).post(handlers::monitoring::set_baseline),
        );

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .merge(monitoring_routes)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::request_metrics::track_duration,
        ))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
