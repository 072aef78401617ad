use core::fmt;

use serde::{Deserialize, Serialize};

/// Three-component vector (metres or radians depending on context).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Velocity set-point.
///
/// Only `linear.x` (forward speed, m/s) and `angular.z` (yaw rate, rad/s)
/// drive the unicycle model; the other components are carried through so a
/// full twist can be round-tripped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VelocityCommand {
    #[serde(default)]
    pub linear: Vector3,
    #[serde(default)]
    pub angular: Vector3,
    /// Time in seconds the command stays active. `None` latches the velocity
    /// until the next command holds it with a wait.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

impl VelocityCommand {
    /// Planar twist: forward speed and yaw rate.
    pub const fn planar(linear_x: f64, angular_z: f64) -> Self {
        Self {
            linear: Vector3::new(linear_x, 0.0, 0.0),
            angular: Vector3::new(0.0, 0.0, angular_z),
            duration: None,
        }
    }

    pub fn linear_x(&self) -> f64 {
        self.linear.x
    }

    pub fn angular_z(&self) -> f64 {
        self.angular.z
    }

    /// Active window in seconds; zero for latched commands.
    pub fn active_window(&self) -> f64 {
        match self.duration {
            Some(d) if d > 0.0 => d,
            _ => 0.0,
        }
    }
}

/// Hold the current velocity for `duration` seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaitCommand {
    pub duration: f64,
}

/// One entry of a [`SimulationPlan`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum Command {
    Velocity(VelocityCommand),
    Wait(WaitCommand),
}

impl Command {
    pub const fn velocity(linear_x: f64, angular_z: f64) -> Self {
        Self::Velocity(VelocityCommand::planar(linear_x, angular_z))
    }

    pub const fn wait(duration: f64) -> Self {
        Self::Wait(WaitCommand { duration })
    }

    /// Explicit duration carried by the command, if any.
    pub fn duration(&self) -> Option<f64> {
        match self {
            Self::Velocity(v) => v.duration,
            Self::Wait(w) => Some(w.duration),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Velocity(_) => "VELOCITY",
            Self::Wait(_) => "WAIT",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Velocity(v) => write!(f, "VELOCITY v={}, w={}", v.linear.x, v.angular.z),
            Self::Wait(w) => write!(f, "WAIT t={}", w.duration),
        }
    }
}

/// Planar robot state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RobotState {
    /// X position in metres.
    pub x: f64,
    /// Y position in metres.
    pub y: f64,
    /// Heading in radians, counter-clockwise from +X. Not wrapped.
    pub theta: f64,
    /// Forward velocity in m/s.
    pub linear_velocity: f64,
    /// Yaw rate in rad/s.
    pub angular_velocity: f64,
    /// Simulation time in seconds.
    pub time: f64,
}

impl RobotState {
    /// Advance the pose by one forward-Euler step of `dt` seconds at the
    /// latched velocity.
    pub fn integrate(&mut self, dt: f64) {
        self.x += self.linear_velocity * self.theta.cos() * dt;
        self.y += self.linear_velocity * self.theta.sin() * dt;
        self.theta += self.angular_velocity * dt;
    }
}

/// Ordered command list plus its total duration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationPlan {
    pub commands: Vec<Command>,
    pub total_duration: f64,
}

impl SimulationPlan {
    /// Build a plan, summing every explicit command duration.
    pub fn new(commands: Vec<Command>) -> Self {
        let total_duration = commands.iter().filter_map(Command::duration).sum();
        Self {
            commands,
            total_duration,
        }
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_duration_sums_waits_and_timed_velocities() {
        let mut timed = VelocityCommand::planar(1.0, 0.0);
        timed.duration = Some(1.5);
        let plan = SimulationPlan::new(vec![
            Command::velocity(0.5, 0.0),
            Command::wait(2.0),
            Command::Velocity(timed),
            Command::wait(0.5),
        ]);
        assert_eq!(plan.len(), 4);
        assert!((plan.total_duration - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_plan_has_zero_duration() {
        let plan = SimulationPlan::new(Vec::new());
        assert!(plan.is_empty());
        assert_eq!(plan.total_duration, 0.0);
    }

    #[test]
    fn test_display_matches_analysis_listing() {
        assert_eq!(Command::velocity(1.0, 0.5).to_string(), "VELOCITY v=1, w=0.5");
        assert_eq!(Command::wait(2.5).to_string(), "WAIT t=2.5");
    }

    #[test]
    fn test_json_tagging() {
        let json = r#"{"type":"VELOCITY","linear":{"x":1.0},"angular":{"z":0.5}}"#;
        let cmd: Command = serde_json::from_str(json).unwrap();
        assert_eq!(cmd, Command::velocity(1.0, 0.5));

        let json = r#"{"type":"WAIT","duration":3}"#;
        let cmd: Command = serde_json::from_str(json).unwrap();
        assert_eq!(cmd, Command::wait(3.0));
    }

    #[test]
    fn test_zero_or_missing_duration_is_latched() {
        let mut cmd = VelocityCommand::planar(1.0, 0.0);
        assert_eq!(cmd.active_window(), 0.0);
        cmd.duration = Some(0.0);
        assert_eq!(cmd.active_window(), 0.0);
        cmd.duration = Some(2.0);
        assert_eq!(cmd.active_window(), 2.0);
    }

    #[test]
    fn test_integrate_straight_then_turn() {
        let mut state = RobotState {
            linear_velocity: 1.0,
            ..Default::default()
        };
        state.integrate(2.0);
        assert!((state.x - 2.0).abs() < 1e-12);
        assert!(state.y.abs() < 1e-12);

        state.linear_velocity = 0.0;
        state.angular_velocity = 1.57;
        state.integrate(1.0);
        assert!((state.theta - 1.57).abs() < 1e-12);
        assert!((state.x - 2.0).abs() < 1e-12);
    }
}
