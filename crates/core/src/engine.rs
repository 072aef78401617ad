//! Deterministic unicycle simulation over a [`SimulationPlan`].
//!
//! Velocity commands latch the forward speed and yaw rate; time only passes
//! inside a wait, or inside a velocity command that carries its own
//! duration. Each time window is integrated with a single forward-Euler
//! step, so the result for a given target time does not depend on how the
//! caller sampled the timeline.

use crate::types::{Command, RobotState, SimulationPlan};

/// Simulation engine for one plan.
#[derive(Debug, Clone)]
pub struct SimulationEngine {
    plan: SimulationPlan,
    state: RobotState,
}

impl SimulationEngine {
    pub fn new(plan: SimulationPlan) -> Self {
        Self {
            plan,
            state: RobotState::default(),
        }
    }

    pub fn plan(&self) -> &SimulationPlan {
        &self.plan
    }

    /// State computed by the last [`step`](Self::step).
    pub fn state(&self) -> &RobotState {
        &self.state
    }

    /// Return to the initial state at t = 0.
    pub fn reset(&mut self) {
        self.state = RobotState::default();
    }

    /// Compute the robot state at `target_time` seconds.
    ///
    /// The plan is re-simulated from t = 0 on every call, so stepping
    /// backwards (scrubbing) is as cheap as stepping forwards. Once the
    /// plan's timeline is exhausted the pose stays where it ended.
    pub fn step(&mut self, target_time: f64) -> RobotState {
        if target_time < self.state.time {
            self.reset();
        }

        let mut sim = RobotState::default();
        let mut sim_time = 0.0;

        for cmd in &self.plan.commands {
            if sim_time >= target_time {
                break;
            }

            let window = match cmd {
                Command::Velocity(v) => {
                    sim.linear_velocity = v.linear.x;
                    sim.angular_velocity = v.angular.z;
                    v.active_window()
                }
                Command::Wait(w) => w.duration,
            };

            if window > 0.0 {
                let dt = (target_time - sim_time).min(window);
                sim.integrate(dt);
                sim_time += window;
            }
        }

        sim.time = target_time;
        self.state = sim;
        sim
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::VelocityCommand;

    const EPS: f64 = 1e-9;

    fn sample_plan() -> SimulationPlan {
        SimulationPlan::new(vec![
            Command::velocity(1.0, 0.0),
            Command::wait(2.0),
            Command::velocity(0.0, 1.57),
            Command::wait(1.0),
            Command::velocity(1.0, 0.0),
            Command::wait(2.0),
            Command::velocity(0.0, 0.0),
        ])
    }

    #[test]
    fn test_initial_state_is_origin() {
        let engine = SimulationEngine::new(sample_plan());
        assert_eq!(*engine.state(), RobotState::default());
    }

    #[test]
    fn test_partial_window() {
        let mut engine = SimulationEngine::new(sample_plan());
        let s = engine.step(1.0);
        assert!((s.x - 1.0).abs() < EPS);
        assert!(s.y.abs() < EPS);
        assert_eq!(s.linear_velocity, 1.0);
        assert_eq!(s.time, 1.0);
    }

    #[test]
    fn test_turn_then_drive_north() {
        let mut engine = SimulationEngine::new(sample_plan());
        let s = engine.step(5.0);
        // 2 m east, quarter turn, 2 m along heading 1.57.
        assert!((s.theta - 1.57).abs() < EPS);
        assert!((s.x - (2.0 + 2.0 * 1.57_f64.cos())).abs() < EPS);
        assert!((s.y - 2.0 * 1.57_f64.sin()).abs() < EPS);
    }

    #[test]
    fn test_pose_freezes_after_plan_end() {
        let mut engine = SimulationEngine::new(sample_plan());
        let end = engine.step(5.0);
        let later = engine.step(50.0);
        assert!((end.x - later.x).abs() < EPS);
        assert!((end.y - later.y).abs() < EPS);
        assert_eq!(later.time, 50.0);
        // The trailing stop command was latched.
        assert_eq!(later.linear_velocity, 0.0);
    }

    #[test]
    fn test_trailing_velocity_without_wait_does_not_move() {
        let plan = SimulationPlan::new(vec![Command::velocity(1.0, 0.0)]);
        let mut engine = SimulationEngine::new(plan);
        let s = engine.step(10.0);
        assert_eq!(s.x, 0.0);
        assert_eq!(s.linear_velocity, 1.0);
    }

    #[test]
    fn test_boundary_command_is_not_applied_yet() {
        let mut engine = SimulationEngine::new(sample_plan());
        let s = engine.step(2.0);
        // The turn command sits at t = 2.0 exactly and is not latched yet.
        assert_eq!(s.angular_velocity, 0.0);
        assert!((s.x - 2.0).abs() < EPS);
    }

    #[test]
    fn test_timed_velocity_consumes_time() {
        let mut cmd = VelocityCommand::planar(0.5, 0.0);
        cmd.duration = Some(2.0);
        let plan = SimulationPlan::new(vec![Command::Velocity(cmd), Command::wait(1.0)]);
        let mut engine = SimulationEngine::new(plan);
        let s = engine.step(3.0);
        // 2 s inside the timed command plus 1 s of wait at the same speed.
        assert!((s.x - 1.5).abs() < EPS);
    }

    #[test]
    fn test_scrubbing_backwards_is_deterministic() {
        let mut engine = SimulationEngine::new(sample_plan());
        let first = engine.step(3.5);
        engine.step(4.5);
        let again = engine.step(3.5);
        assert_eq!(first, again);
    }

    #[test]
    fn test_reset_returns_to_origin() {
        let mut engine = SimulationEngine::new(sample_plan());
        engine.step(4.0);
        engine.reset();
        assert_eq!(*engine.state(), RobotState::default());
    }
}
