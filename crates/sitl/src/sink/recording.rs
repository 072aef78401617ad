//! Call recorder for both motion collaborators.
//!
//! A single shared log captures velocity commands and delays in the order
//! they were issued, so tests and dry runs can inspect the exact sequence a
//! routine produces.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use crate::delay::Delay;
use crate::error::MotionError;
use crate::sink::VelocitySink;

/// One collaborator invocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Call {
    Velocity { linear: f64, angular: f64 },
    Delay { secs: f64 },
}

/// Records every call it receives. Clones share the same log.
#[derive(Debug, Clone)]
pub struct CallRecorder {
    name: String,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl CallRecorder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Snapshot of all calls so far.
    pub fn calls(&self) -> Vec<Call> {
        self.lock().clone()
    }

    pub fn velocity_count(&self) -> usize {
        self.lock()
            .iter()
            .filter(|c| matches!(c, Call::Velocity { .. }))
            .count()
    }

    pub fn delay_count(&self) -> usize {
        self.lock()
            .iter()
            .filter(|c| matches!(c, Call::Delay { .. }))
            .count()
    }

    /// Sum of all recorded delays in seconds.
    pub fn total_delay(&self) -> f64 {
        self.lock()
            .iter()
            .filter_map(|c| match c {
                Call::Delay { secs } => Some(*secs),
                Call::Velocity { .. } => None,
            })
            .sum()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Call>> {
        // A panic while pushing cannot leave the log half-written.
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for CallRecorder {
    fn default() -> Self {
        Self::new("recorder")
    }
}

#[async_trait]
impl VelocitySink for CallRecorder {
    fn name(&self) -> &str {
        &self.name
    }

    async fn send_velocity(&mut self, linear_x: f64, angular_z: f64) -> Result<(), MotionError> {
        self.lock().push(Call::Velocity {
            linear: linear_x,
            angular: angular_z,
        });
        Ok(())
    }
}

#[async_trait]
impl Delay for CallRecorder {
    async fn delay(&mut self, duration: Duration) -> Result<(), MotionError> {
        self.lock().push(Call::Delay {
            secs: duration.as_secs_f64(),
        });
        Ok(())
    }
}
