//! Scripted motion routines.
//!
//! [`move_robot`] is the fixed demonstration routine: accelerate, cruise,
//! quarter turn, cruise, stop. [`execute_plan`] drives the same two
//! collaborators from an arbitrary parsed plan.

use std::time::Duration;

use robosim_core::{Command, SimulationPlan};

use crate::delay::{secs_to_duration, Delay};
use crate::error::MotionError;
use crate::sink::VelocitySink;

/// One call of a scripted routine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RoutineStep {
    /// Forward speed (m/s) and yaw rate (rad/s).
    Velocity { linear: f64, angular: f64 },
    /// Pause in seconds.
    Delay { secs: f64 },
}

/// The demonstration routine, in call order.
pub const DEMO_STEPS: [RoutineStep; 9] = [
    // Accelerate forward
    RoutineStep::Velocity {
        linear: 0.5,
        angular: 0.0,
    },
    RoutineStep::Delay { secs: 1.0 },
    RoutineStep::Velocity {
        linear: 1.0,
        angular: 0.0,
    },
    RoutineStep::Delay { secs: 2.0 },
    // 90 degree turn
    RoutineStep::Velocity {
        linear: 0.0,
        angular: 1.57,
    },
    RoutineStep::Delay { secs: 1.0 },
    // Forward again
    RoutineStep::Velocity {
        linear: 1.0,
        angular: 0.0,
    },
    RoutineStep::Delay { secs: 2.0 },
    // Stop
    RoutineStep::Velocity {
        linear: 0.0,
        angular: 0.0,
    },
];

/// Run the demonstration routine once.
///
/// Issues five velocity commands and four delays, in order. The first
/// collaborator failure is returned as-is and no further calls are made.
pub async fn move_robot<S, D>(sink: &mut S, delay: &mut D) -> Result<(), MotionError>
where
    S: VelocitySink + ?Sized,
    D: Delay + ?Sized,
{
    log::info!("running demonstration routine on {}", sink.name());
    run_steps(&DEMO_STEPS, sink, delay).await
}

/// Issue a fixed list of routine steps.
pub async fn run_steps<S, D>(
    steps: &[RoutineStep],
    sink: &mut S,
    delay: &mut D,
) -> Result<(), MotionError>
where
    S: VelocitySink + ?Sized,
    D: Delay + ?Sized,
{
    for step in steps {
        match *step {
            RoutineStep::Velocity { linear, angular } => {
                sink.send_velocity(linear, angular).await?;
            }
            RoutineStep::Delay { secs } => {
                delay.delay(secs_to_duration(secs)?).await?;
                sink.window_elapsed();
            }
        }
    }
    Ok(())
}

/// The demonstration routine as a plan, for the simulation engine and the
/// playback controller.
pub fn demo_plan() -> SimulationPlan {
    SimulationPlan::new(
        DEMO_STEPS
            .iter()
            .map(|step| match *step {
                RoutineStep::Velocity { linear, angular } => Command::velocity(linear, angular),
                RoutineStep::Delay { secs } => Command::wait(secs),
            })
            .collect(),
    )
}

/// Summary of one [`execute_plan`] run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ExecutionReport {
    pub velocity_commands: usize,
    pub delays: usize,
    pub total_delay: Duration,
}

/// Drive the collaborators from a parsed plan.
///
/// A velocity command with a positive duration is followed by a delay of
/// that duration; waits become delays. Stops at the first failure.
pub async fn execute_plan<S, D>(
    plan: &SimulationPlan,
    sink: &mut S,
    delay: &mut D,
) -> Result<ExecutionReport, MotionError>
where
    S: VelocitySink + ?Sized,
    D: Delay + ?Sized,
{
    let mut report = ExecutionReport::default();

    for (index, cmd) in plan.commands.iter().enumerate() {
        log::debug!("command {}: {cmd}", index + 1);
        let hold = match cmd {
            Command::Velocity(v) => {
                sink.send_velocity(v.linear_x(), v.angular_z()).await?;
                report.velocity_commands += 1;
                v.active_window()
            }
            Command::Wait(w) => w.duration,
        };

        if matches!(cmd, Command::Wait(_)) || hold > 0.0 {
            let duration = secs_to_duration(hold)?;
            delay.delay(duration).await?;
            sink.window_elapsed();
            report.delays += 1;
            report.total_delay += duration;
        }
    }

    log::info!(
        "plan executed: {} velocity commands, {} delays, {:.3}s",
        report.velocity_commands,
        report.delays,
        report.total_delay.as_secs_f64()
    );
    Ok(report)
}
