//! Kinematic unicycle sink.
//!
//! Built-in motion model with no external dependencies, suitable for dry
//! runs and CI. The sink reads a shared [`SimClock`]: every command, and
//! every elapsed delay window, integrates the latched velocity over the
//! simulated time that passed since the last update. Paired with a
//! [`SimDelay`](crate::delay::SimDelay) over the same clock, running a plan
//! through this sink takes one Euler step per window and lands on the same
//! pose as [`SimulationEngine`](robosim_core::SimulationEngine).

use std::f64::consts::PI;

use async_trait::async_trait;
use robosim_core::RobotState;

use crate::clock::SimClock;
use crate::error::MotionError;
use crate::sink::VelocitySink;

/// Limits applied to incoming commands.
#[derive(Debug, Clone)]
pub struct KinematicConfig {
    /// Maximum forward speed magnitude in m/s.
    pub max_speed: f64,
    /// Maximum yaw rate magnitude in rad/s.
    pub max_turn_rate: f64,
}

impl KinematicConfig {
    /// Limits usable as clamp bounds: negative values are taken by
    /// magnitude, NaN means unlimited.
    fn sanitized(&self) -> Self {
        Self {
            max_speed: limit(self.max_speed),
            max_turn_rate: limit(self.max_turn_rate),
        }
    }
}

fn limit(max: f64) -> f64 {
    if max.is_nan() {
        f64::INFINITY
    } else {
        max.abs()
    }
}

impl Default for KinematicConfig {
    fn default() -> Self {
        Self {
            max_speed: f64::INFINITY,
            max_turn_rate: f64::INFINITY,
        }
    }
}

/// Velocity sink that simulates a unicycle robot.
pub struct KinematicSink {
    name: String,
    config: KinematicConfig,
    clock: SimClock,
    state: RobotState,
    last_update_us: u64,
    connected: bool,
    commands_received: u64,
}

impl KinematicSink {
    pub fn new(name: &str, clock: SimClock, config: KinematicConfig) -> Self {
        let last_update_us = clock.now_us();
        Self {
            name: name.to_string(),
            config: config.sanitized(),
            clock,
            state: RobotState::default(),
            last_update_us,
            connected: false,
            commands_received: 0,
        }
    }

    /// Unlimited sink named `kinematic`.
    pub fn with_defaults(clock: SimClock) -> Self {
        Self::new("kinematic", clock, KinematicConfig::default())
    }

    /// Bring the sink online, resetting the robot to the origin at the
    /// current clock time.
    pub fn connect(&mut self) {
        self.state = RobotState {
            time: self.clock.now_secs(),
            ..RobotState::default()
        };
        self.last_update_us = self.clock.now_us();
        self.commands_received = 0;
        self.connected = true;
        log::info!("{}: connected at t={:.3}s", self.name, self.state.time);
    }

    /// Take the sink offline. The robot stops where it is.
    pub fn disconnect(&mut self) {
        self.sync();
        self.state.linear_velocity = 0.0;
        self.state.angular_velocity = 0.0;
        self.connected = false;
        log::info!("{}: disconnected", self.name);
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Pose at the current clock time, without mutating the sink.
    pub fn pose(&self) -> RobotState {
        let mut state = self.state;
        let now = self.clock.now_us();
        let dt = now.saturating_sub(self.last_update_us) as f64 / 1_000_000.0;
        if dt > 0.0 {
            state.integrate(dt);
        }
        state.time = now as f64 / 1_000_000.0;
        state
    }

    /// Heading wrapped to [-pi, pi].
    pub fn heading(&self) -> f64 {
        normalize_angle(self.pose().theta)
    }

    pub fn commands_received(&self) -> u64 {
        self.commands_received
    }

    fn sync(&mut self) {
        self.state = self.pose();
        self.last_update_us = self.clock.now_us();
    }
}

impl std::fmt::Debug for KinematicSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KinematicSink")
            .field("name", &self.name)
            .field("connected", &self.connected)
            .field("state", &self.state)
            .finish()
    }
}

#[async_trait]
impl VelocitySink for KinematicSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn window_elapsed(&mut self) {
        if self.connected {
            self.sync();
        }
    }

    async fn send_velocity(&mut self, linear_x: f64, angular_z: f64) -> Result<(), MotionError> {
        if !self.connected {
            return Err(MotionError::SinkUnavailable(format!(
                "{} is not connected",
                self.name
            )));
        }
        if !linear_x.is_finite() || !angular_z.is_finite() {
            return Err(MotionError::Publish(format!(
                "non-finite command ({linear_x}, {angular_z})"
            )));
        }

        self.sync();
        self.state.linear_velocity = linear_x.clamp(-self.config.max_speed, self.config.max_speed);
        self.state.angular_velocity =
            angular_z.clamp(-self.config.max_turn_rate, self.config.max_turn_rate);
        self.commands_received += 1;

        log::debug!(
            "{}: t={:.3}s v={} w={} pose=({:.3}, {:.3}, {:.3})",
            self.name,
            self.state.time,
            self.state.linear_velocity,
            self.state.angular_velocity,
            self.state.x,
            self.state.y,
            self.state.theta
        );
        Ok(())
    }
}

/// Normalize angle to [-pi, pi].
fn normalize_angle(angle: f64) -> f64 {
    let mut a = angle % (2.0 * PI);
    if a > PI {
        a -= 2.0 * PI;
    } else if a < -PI {
        a += 2.0 * PI;
    }
    a
}
