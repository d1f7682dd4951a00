//! Configuration module

use std::env;
use std::path::PathBuf;

use classifier_monitor::constants::{
    DEFAULT_DRIFT_THRESHOLD, DEFAULT_METRICS_NAMESPACE, DEFAULT_WINDOW_SIZE,
};
use classifier_monitor::MonitorConfig;

/// CIFAR-10 labels, used when no classes file is present
pub const DEFAULT_CLASSES: [&str; 10] = [
    "airplane", "automobile", "bird", "cat", "deer",
    "dog", "frog", "horse", "ship", "truck",
];

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Model weights served by the inference workers
    pub model_path: PathBuf,

    /// Class labels, one per line
    pub classes_path: PathBuf,

    /// Rolling window capacity
    pub window_size: usize,

    /// Drift threshold
    pub drift_threshold: f64,

    /// Prefix of every exported metric
    pub metrics_namespace: String,

    /// Environment (development, production)
    pub environment: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            model_path: PathBuf::from("model.pt"),
            classes_path: PathBuf::from("artifacts/classes.txt"),
            window_size: DEFAULT_WINDOW_SIZE,
            drift_threshold: DEFAULT_DRIFT_THRESHOLD,
            metrics_namespace: DEFAULT_METRICS_NAMESPACE.to_string(),
            environment: "development".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            host: env::var("API_HOST").unwrap_or(defaults.host),

            port: env::var("API_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),

            model_path: env::var("MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.model_path),

            classes_path: env::var("CLASSES_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.classes_path),

            window_size: env::var("WINDOW_SIZE")
                .ok()
                .and_then(|w| w.parse().ok())
                .unwrap_or(defaults.window_size),

            drift_threshold: env::var("DRIFT_THRESHOLD")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(defaults.drift_threshold),

            metrics_namespace: env::var("METRICS_NAMESPACE")
                .unwrap_or(defaults.metrics_namespace),

            environment: env::var("ENVIRONMENT").unwrap_or(defaults.environment),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn monitor_config(&self) -> MonitorConfig {
        MonitorConfig {
            window_size: self.window_size,
            drift_threshold: self.drift_threshold,
        }
    }

    /// Whether the model artifact exists on disk
    pub fn model_available(&self) -> bool {
        self.model_path.is_file()
    }

    /// Class labels from `classes_path`, or the CIFAR-10 defaults
    pub fn load_classes(&self) -> Vec<String> {
        match std::fs::read_to_string(&self.classes_path) {
            Ok(content) => {
                let classes: Vec<String> = content
                    .lines()
                    .map(str::trim)
                    .filter(|l| !l.is_empty())
                    .map(String::from)
                    .collect();

                if classes.is_empty() {
                    tracing::warn!("Classes file {:?} is empty, using defaults", self.classes_path);
                    default_classes()
                } else {
                    classes
                }
            }
            Err(e) => {
                tracing::debug!("Classes file {:?} not readable ({}), using defaults", self.classes_path, e);
                default_classes()
            }
        }
    }
}

fn default_classes() -> Vec<String> {
    DEFAULT_CLASSES.iter().map(|c| c.to_string()).collect()
}
