//! Simulated time source.
//!
//! Wraps a shared atomic counter for simulation time so a delay primitive
//! can advance time while a simulated sink reads it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Simulated clock backed by a shared microsecond counter.
///
/// Clones share the same counter.
#[derive(Debug, Clone, Default)]
pub struct SimClock {
    time_us: Arc<AtomicU64>,
}

impl SimClock {
    /// Create a new clock starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current simulation time in microseconds.
    pub fn now_us(&self) -> u64 {
        self.time_us.load(Ordering::Relaxed)
    }

    /// Current simulation time in seconds.
    pub fn now_secs(&self) -> f64 {
        self.now_us() as f64 / 1_000_000.0
    }

    /// Advance simulation time.
    pub fn advance(&self, by: Duration) {
        let us = u64::try_from(by.as_micros()).unwrap_or(u64::MAX);
        self.time_us.fetch_add(us, Ordering::Relaxed);
    }

    /// Set simulation time to an absolute value.
    pub fn set_us(&self, us: u64) {
        self.time_us.store(us, Ordering::Relaxed);
    }

    pub fn reset(&self) {
        self.set_us(0);
    }
}
