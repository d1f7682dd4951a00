//! Prediction Observers
//!
//! The window store publishes a "prediction recorded" event to every
//! subscribed observer. The metrics registry is one such subscriber; tests
//! plug in their own.

use crate::record::PredictionRecord;

/// Subscriber to prediction-recorded events.
///
/// Called while the window lock is held, so implementations must stay
/// synchronous, cheap and must not call back into the store.
pub trait PredictionObserver: Send + Sync {
    fn prediction_recorded(&self, record: &PredictionRecord);
}
