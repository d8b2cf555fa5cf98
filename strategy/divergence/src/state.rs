use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::DEFAULT_THRESHOLD;

/// State shared between the monitor and the command listener.
///
/// The threshold is an `f64` stored by bit pattern so both tasks can access it
/// without a lock.
#[derive(Debug)]
pub struct SharedState {
    threshold: AtomicU64,
}

impl SharedState {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: AtomicU64::new(threshold.to_bits()),
        }
    }

    /// Current alert threshold in percent.
    pub fn threshold(&self) -> f64 {
        f64::from_bits(self.threshold.load(Ordering::Relaxed))
    }

    pub fn set_threshold(&self, value: f64) {
        self.threshold.store(value.to_bits(), Ordering::Relaxed);
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}
