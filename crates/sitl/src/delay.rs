//! Delay primitive and time synchronisation modes.

use std::time::Duration;

use async_trait::async_trait;

use crate::clock::SimClock;
use crate::error::MotionError;

/// Suspends the caller for a duration.
#[async_trait]
pub trait Delay: Send {
    async fn delay(&mut self, duration: Duration) -> Result<(), MotionError>;
}

/// How a [`SimDelay`] relates simulated time to wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TimeMode {
    /// Time advances instantly; delays never block.
    #[default]
    Simulated,
    /// Delays sleep for their full wall-clock duration.
    RealTime,
    /// Delays sleep for `duration / factor` of wall-clock time.
    Scaled { factor: f32 },
}

impl TimeMode {
    /// Wall-clock time a delay of `duration` should block for.
    pub fn wall_time(&self, duration: Duration) -> Result<Duration, MotionError> {
        match *self {
            Self::Simulated => Ok(Duration::ZERO),
            Self::RealTime => Ok(duration),
            Self::Scaled { factor } => {
                if !factor.is_finite() || factor <= 0.0 {
                    return Err(MotionError::InvalidTimeScale(factor));
                }
                Duration::try_from_secs_f64(duration.as_secs_f64() / f64::from(factor))
                    .map_err(|_| MotionError::InvalidTimeScale(factor))
            }
        }
    }
}

/// Delay primitive that keeps a [`SimClock`] in step with every delay.
///
/// Simulated time always advances by the requested duration; the time mode
/// only decides how long the caller is actually suspended.
#[derive(Debug, Clone)]
pub struct SimDelay {
    clock: SimClock,
    mode: TimeMode,
}

impl SimDelay {
    pub fn new(clock: SimClock, mode: TimeMode) -> Self {
        Self { clock, mode }
    }

    /// Non-blocking delay over the given clock.
    pub fn simulated(clock: SimClock) -> Self {
        Self::new(clock, TimeMode::Simulated)
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn mode(&self) -> TimeMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: TimeMode) {
        self.mode = mode;
    }
}

#[async_trait]
impl Delay for SimDelay {
    async fn delay(&mut self, duration: Duration) -> Result<(), MotionError> {
        let wall = self.mode.wall_time(duration)?;
        if !wall.is_zero() {
            tokio::time::sleep(wall).await;
        }
        self.clock.advance(duration);
        log::trace!(
            "delay {:.3}s (wall {:.3}s), sim time {:.3}s",
            duration.as_secs_f64(),
            wall.as_secs_f64(),
            self.clock.now_secs()
        );
        Ok(())
    }
}

/// Convert a delay in seconds into a [`Duration`], rejecting negative and
/// non-finite values.
pub fn secs_to_duration(secs: f64) -> Result<Duration, MotionError> {
    Duration::try_from_secs_f64(secs).map_err(|_| MotionError::InvalidDuration(secs))
}
