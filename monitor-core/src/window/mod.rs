//! Rolling Window Store
//!
//! Fixed-capacity FIFO buffers holding the most recent predictions.
//!
//! # Structure
//! - `mod.rs`: `WindowState` (four parallel sequences) and `WindowStore` (lock + observers)
//! - `aggregate.rs`: `ModelMetrics` snapshot computed from the live window
//!
//! Every append pushes exactly once onto each sequence, so index `i` of
//! `records`, `confidences`, `processing_times` and `class_distributions`
//! always describes the same event.

pub mod aggregate;

use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;

use parking_lot::Mutex;

pub use aggregate::ModelMetrics;

use crate::drift::{self, DriftReport};
use crate::observer::PredictionObserver;
use crate::record::PredictionRecord;

/// Class label -> number of predictions in the window
pub type ClassDistribution = BTreeMap<String, u64>;

// ============================================================================
// WINDOW STATE
// ============================================================================

#[derive(Debug, Clone)]
pub struct WindowState {
    capacity: usize,
    records: VecDeque<PredictionRecord>,
    confidences: VecDeque<f64>,
    processing_times: VecDeque<f64>,
    class_distributions: VecDeque<ClassDistribution>,
    /// Live counts for `records`; cloned into `class_distributions` on append
    live_counts: ClassDistribution,
}

impl WindowState {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            records: VecDeque::with_capacity(capacity),
            confidences: VecDeque::with_capacity(capacity),
            processing_times: VecDeque::with_capacity(capacity),
            class_distributions: VecDeque::with_capacity(capacity),
            live_counts: ClassDistribution::new(),
        }
    }

    /// Append one record to all four sequences, evicting the oldest on overflow
    pub fn push(&mut self, record: PredictionRecord) {
        *self
            .live_counts
            .entry(record.predicted_class.clone())
            .or_insert(0) += 1;

        self.confidences.push_back(record.confidence);
        self.processing_times.push_back(record.processing_time);
        self.records.push_back(record);

        while self.records.len() > self.capacity {
            if let Some(evicted) = self.records.pop_front() {
                self.forget_class(&evicted.predicted_class);
            }
        }
        trim_front(&mut self.confidences, self.capacity);
        trim_front(&mut self.processing_times, self.capacity);

        // Snapshot of the distribution over the whole live window
        self.class_distributions.push_back(self.live_counts.clone());
        trim_front(&mut self.class_distributions, self.capacity);
    }

    fn forget_class(&mut self, class: &str) {
        if let Some(count) = self.live_counts.get_mut(class) {
            *count -= 1;
            if *count == 0 {
                self.live_counts.remove(class);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> impl DoubleEndedIterator<Item = &PredictionRecord> {
        self.records.iter()
    }

    /// Up to `limit` most recent confidences, oldest first
    pub fn recent_confidences(&self, limit: usize) -> Vec<f64> {
        tail(&self.confidences, limit)
    }

    /// Up to `limit` most recent processing times, oldest first
    pub fn recent_processing_times(&self, limit: usize) -> Vec<f64> {
        tail(&self.processing_times, limit)
    }

    /// Distribution snapshot taken by the latest append
    pub fn latest_distribution(&self) -> Option<&ClassDistribution> {
        self.class_distributions.back()
    }

    pub fn distribution_snapshots(&self) -> usize {
        self.class_distributions.len()
    }
}

fn trim_front<T>(buffer: &mut VecDeque<T>, capacity: usize) {
    while buffer.len() > capacity {
        buffer.pop_front();
    }
}

fn tail(buffer: &VecDeque<f64>, limit: usize) -> Vec<f64> {
    let start = buffer.len().saturating_sub(limit);
    buffer.iter().skip(start).copied().collect()
}

// ============================================================================
// WINDOW STORE
// ============================================================================

/// Thread-safe window shared by all request handlers.
///
/// A single mutex guards the whole state; every operation holds it for its
/// full critical section and never performs I/O under it.
pub struct WindowStore {
    state: Mutex<WindowState>,
    observers: Vec<Arc<dyn PredictionObserver>>,
}

impl WindowStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            state: Mutex::new(WindowState::new(capacity)),
            observers: Vec::new(),
        }
    }

    /// Subscribe an observer to prediction-recorded events
    pub fn with_observer(mut self, observer: Arc<dyn PredictionObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Ingest one prediction.
    ///
    /// Append, eviction, distribution snapshot and observer notification
    /// happen as one unit under the lock.
    pub fn record(&self, record: PredictionRecord) {
        let mut state = self.state.lock();
        for observer in &self.observers {
            observer.prediction_recorded(&record);
        }
        log::debug!(
            "Recorded prediction '{}' (confidence {:.3}, {:.4}s, success={})",
            record.predicted_class,
            record.confidence,
            record.processing_time,
            record.success
        );
        state.push(record);
    }

    /// Point-in-time aggregate over the live window
    pub fn snapshot(&self) -> ModelMetrics {
        self.state.lock().aggregate()
    }

    /// Compare the live window against `baseline`
    pub fn detect(&self, baseline: Option<&ModelMetrics>, threshold: f64) -> DriftReport {
        let state = self.state.lock();
        drift::evaluate(&state, baseline, threshold)
    }

    pub fn len(&self) -> usize {
        self.state.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().is_empty()
    }

    /// Copy of the stored records, oldest first
    pub fn records(&self) -> Vec<PredictionRecord> {
        self.state.lock().records().cloned().collect()
    }
}
