//! Error handling

use thiserror::Error;

pub type MonitorResult<T> = Result<T, MonitorError>;

/// Failures of the monitoring boundary.
///
/// Recording, aggregation and drift checks are infallible; these only come
/// from construction, exposition and resource sampling.
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("Invalid monitor configuration: {0}")]
    InvalidConfig(String),

    #[error("Metrics registry error: {0}")]
    Metrics(#[from] prometheus::Error),

    #[error("Metrics encoding error: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("System sampling failed: {0}")]
    SystemSampling(String),
}
