//! Configuration module

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_DRIFT_THRESHOLD, DEFAULT_WINDOW_SIZE};
use crate::error::{MonitorError, MonitorResult};

/// Monitor configuration, fixed once a monitor is built
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Capacity of the rolling window
    pub window_size: usize,

    /// Absolute difference that counts as drift
    pub drift_threshold: f64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            drift_threshold: DEFAULT_DRIFT_THRESHOLD,
        }
    }
}

impl MonitorConfig {
    pub fn new(window_size: usize, drift_threshold: f64) -> MonitorResult<Self> {
        let config = Self { window_size, drift_threshold };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> MonitorResult<()> {
        if self.window_size == 0 {
            return Err(MonitorError::InvalidConfig(
                "window_size must be at least 1".to_string(),
            ));
        }
        if !self.drift_threshold.is_finite() || self.drift_threshold < 0.0 {
            return Err(MonitorError::InvalidConfig(format!(
                "drift_threshold must be a non-negative number, got {}",
                self.drift_threshold
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MonitorConfig::default();
        assert_eq!(config.window_size, 1000);
        assert_eq!(config.drift_threshold, 0.1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_reject_empty_window() {
        assert!(matches!(
            MonitorConfig::new(0, 0.1),
            Err(MonitorError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_reject_bad_threshold() {
        assert!(MonitorConfig::new(10, -0.5).is_err());
        assert!(MonitorConfig::new(10, f64::NAN).is_err());
        assert!(MonitorConfig::new(10, 0.0).is_ok());
    }
}
