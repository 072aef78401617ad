//! robosim_sitl - software-in-the-loop runtime for command scripts
//!
//! Connects scripted motion (the demonstration routine or a parsed plan) to
//! two collaborators: a [`VelocitySink`] that accepts velocity set-points
//! and a [`Delay`] that suspends between them. The built-in
//! [`KinematicSink`] and [`SimDelay`] share a [`SimClock`], so a routine can
//! be run instantly, in real time, or at a scaled rate.

pub mod clock;
pub mod config;
pub mod delay;
pub mod error;
pub mod routine;
pub mod sink;

pub use clock::SimClock;
pub use config::{SitlConfig, TimeModeSetting};
pub use delay::{Delay, SimDelay, TimeMode};
pub use error::{ConfigError, MotionError};
pub use routine::{demo_plan, execute_plan, move_robot, ExecutionReport, RoutineStep, DEMO_STEPS};
pub use sink::{Call, CallRecorder, KinematicConfig, KinematicSink, VelocitySink};
