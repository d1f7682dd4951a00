//! Classifier Monitor - Prediction telemetry & drift detection
//!
//! Rolling-window store for per-request prediction records, aggregate
//! metrics, a threshold drift heuristic against an operator-captured
//! baseline, and the Prometheus registry fed by the window.
//!
//! # Architecture
//!
//! ```text
//! PredictionRecord ──▶ WindowStore ──(observer)──▶ MetricsRegistry ──▶ /metrics
//!                          │
//!            ┌─────────────┼──────────────┐
//!            ▼             ▼              ▼
//!        aggregate      drift::evaluate ◀── BaselineManager
//!       (ModelMetrics)  (DriftReport)
//! ```
//!
//! Everything is pull-based: no background jobs, no timers.

pub mod baseline;
pub mod config;
pub mod constants;
pub mod drift;
pub mod error;
pub mod metrics;
pub mod monitor;
pub mod observer;
pub mod record;
pub mod system;
pub mod window;

pub use baseline::BaselineManager;
pub use config::MonitorConfig;
pub use drift::{DriftReport, DriftSignals};
pub use error::{MonitorError, MonitorResult};
pub use metrics::MetricsRegistry;
pub use monitor::ModelMonitor;
pub use observer::PredictionObserver;
pub use record::{InputSize, PredictionRecord, PredictionStatus};
pub use system::{SystemMetrics, SystemMonitor, SystemReport};
pub use window::{ClassDistribution, ModelMetrics, WindowState, WindowStore};
