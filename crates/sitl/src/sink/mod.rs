pub mod kinematic;
pub mod recording;

use async_trait::async_trait;

pub use kinematic::{KinematicConfig, KinematicSink};
pub use recording::{Call, CallRecorder};

use crate::error::MotionError;

/// Destination for velocity set-points.
///
/// Units, rate limits and acknowledgement belong to the implementation;
/// callers only see success or a [`MotionError`]. Object safe, so sinks can
/// be stored as `Box<dyn VelocitySink>`.
#[async_trait]
pub trait VelocitySink: Send {
    /// Human-readable name for this sink instance.
    fn name(&self) -> &str;

    /// Called by the routines after every completed delay. Sinks that model
    /// motion settle the window that just ended here.
    fn window_elapsed(&mut self) {}

    /// Command a forward speed (m/s) and yaw rate (rad/s).
    async fn send_velocity(&mut self, linear_x: f64, angular_z: f64) -> Result<(), MotionError>;
}
