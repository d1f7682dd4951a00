//! Metrics Registry
//!
//! Process-wide counters, histograms and gauges published in the
//! Prometheus text exposition format. The registry is an explicitly owned
//! instance (never the crate-global default registry) so each service or
//! test gets its own isolated set of metrics.

use prometheus::{
    Encoder, Gauge, Histogram, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts,
    Registry, TextEncoder,
};

use crate::error::MonitorResult;
use crate::observer::PredictionObserver;
use crate::record::PredictionRecord;
use crate::system::SystemMetrics;

/// Content type of the rendered exposition
pub const CONTENT_TYPE: &str = prometheus::TEXT_FORMAT;

/// Error type label for failed inferences
pub const PREDICTION_ERROR: &str = "prediction_error";

const CONFIDENCE_BUCKETS: &[f64] = &[0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0];

pub struct MetricsRegistry {
    registry: Registry,
    predictions: IntCounterVec,
    prediction_duration: Histogram,
    confidence: Histogram,
    errors: IntCounterVec,
    model_loaded: IntGauge,
    request_duration: HistogramVec,
    system_memory: Gauge,
    system_cpu: Gauge,
}

impl MetricsRegistry {
    pub fn new(namespace: &str) -> MonitorResult<Self> {
        let registry = Registry::new();

        let predictions = IntCounterVec::new(
            Opts::new("predictions_total", "Total number of predictions").namespace(namespace),
            &["class", "status"],
        )?;
        let prediction_duration = Histogram::with_opts(
            HistogramOpts::new("prediction_duration_seconds", "Prediction duration in seconds")
                .namespace(namespace),
        )?;
        let confidence = Histogram::with_opts(
            HistogramOpts::new("prediction_confidence", "Prediction confidence scores")
                .namespace(namespace)
                .buckets(CONFIDENCE_BUCKETS.to_vec()),
        )?;
        let errors = IntCounterVec::new(
            Opts::new("errors_total", "Total number of errors").namespace(namespace),
            &["error_type"],
        )?;
        let model_loaded = IntGauge::with_opts(
            Opts::new("model_loaded", "Model loaded status (1=loaded, 0=not_loaded)")
                .namespace(namespace),
        )?;
        let request_duration = HistogramVec::new(
            HistogramOpts::new("request_duration_seconds", "Request duration in seconds")
                .namespace(namespace),
            &["endpoint"],
        )?;
        let system_memory = Gauge::with_opts(
            Opts::new("system_memory_bytes", "System memory usage in bytes").namespace(namespace),
        )?;
        let system_cpu = Gauge::with_opts(
            Opts::new("system_cpu_percent", "System CPU usage percentage").namespace(namespace),
        )?;

        registry.register(Box::new(predictions.clone()))?;
        registry.register(Box::new(prediction_duration.clone()))?;
        registry.register(Box::new(confidence.clone()))?;
        registry.register(Box::new(errors.clone()))?;
        registry.register(Box::new(model_loaded.clone()))?;
        registry.register(Box::new(request_duration.clone()))?;
        registry.register(Box::new(system_memory.clone()))?;
        registry.register(Box::new(system_cpu.clone()))?;

        Ok(Self {
            registry,
            predictions,
            prediction_duration,
            confidence,
            errors,
            model_loaded,
            request_duration,
            system_memory,
            system_cpu,
        })
    }

    /// Render every registered metric in the text exposition format
    pub fn render(&self) -> MonitorResult<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::<u8>::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }

    pub fn set_model_loaded(&self, loaded: bool) {
        self.model_loaded.set(i64::from(loaded));
    }

    pub fn observe_request(&self, endpoint: &str, seconds: f64) {
        self.request_duration
            .with_label_values(&[endpoint])
            .observe(seconds);
    }

    pub fn record_error(&self, error_type: &str) {
        self.errors.with_label_values(&[error_type]).inc();
    }

    pub fn observe_system(&self, system: &SystemMetrics) {
        self.system_memory.set(system.memory_used_bytes as f64);
        self.system_cpu.set(f64::from(system.cpu_percent));
    }

    pub fn prediction_count(&self, class: &str, status: &str) -> u64 {
        self.predictions.with_label_values(&[class, status]).get()
    }

    pub fn error_count(&self, error_type: &str) -> u64 {
        self.errors.with_label_values(&[error_type]).get()
    }
}

impl PredictionObserver for MetricsRegistry {
    fn prediction_recorded(&self, record: &PredictionRecord) {
        let status = record.status();
        self.predictions
            .with_label_values(&[record.predicted_class.as_str(), status.as_str()])
            .inc();
        if !record.success {
            self.record_error(PREDICTION_ERROR);
        }

        self.confidence.observe(record.confidence);
        self.prediction_duration.observe(record.processing_time);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prediction_counters() {
        let metrics = MetricsRegistry::new("test").unwrap();

        metrics.prediction_recorded(&PredictionRecord::success("cat", 0.9, 0.01));
        metrics.prediction_recorded(&PredictionRecord::success("cat", 0.8, 0.02));
        metrics.prediction_recorded(&PredictionRecord::failure("dog", 0.05, "boom"));

        assert_eq!(metrics.prediction_count("cat", "success"), 2);
        assert_eq!(metrics.prediction_count("dog", "error"), 1);
        assert_eq!(metrics.error_count(PREDICTION_ERROR), 1);
    }

    #[test]
    fn test_render_exposition() {
        let metrics = MetricsRegistry::new("cifar10").unwrap();
        metrics.set_model_loaded(true);
        metrics.observe_request("/health", 0.003);
        metrics.prediction_recorded(&PredictionRecord::success("ship", 0.7, 0.04));

        let text = metrics.render().unwrap();

        assert!(text.contains("cifar10_predictions_total{class=\"ship\",status=\"success\"} 1"));
        assert!(text.contains("cifar10_model_loaded 1"));
        assert!(text.contains("cifar10_prediction_confidence_bucket"));
        assert!(text.contains("cifar10_prediction_duration_seconds_count 1"));
        assert!(text.contains("cifar10_request_duration_seconds_count{endpoint=\"/health\"} 1"));
        assert!(text.contains("# HELP cifar10_system_cpu_percent"));
    }

    #[test]
    fn test_registries_are_isolated() {
        let a = MetricsRegistry::new("cifar10").unwrap();
        let b = MetricsRegistry::new("cifar10").unwrap();

        a.prediction_recorded(&PredictionRecord::success("cat", 0.9, 0.01));

        assert_eq!(a.prediction_count("cat", "success"), 1);
        assert_eq!(b.prediction_count("cat", "success"), 0);
    }
}
