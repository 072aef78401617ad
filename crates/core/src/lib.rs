//! robosim_core - command-script IR, parser and simulation engine
//!
//! Synchronous, runtime-free logic that can be tested on host without any
//! simulator backend.
//!
//! # Modules
//!
//! - [`types`]: Plan IR (velocity/wait commands, robot state)
//! - [`parser`]: Script and JSON parsing into a [`SimulationPlan`]
//! - [`engine`]: Deterministic unicycle simulation over a plan
//! - [`playback`]: Timeline controller that drives the engine

pub mod engine;
pub mod error;
pub mod parser;
pub mod playback;
pub mod types;

pub use engine::SimulationEngine;
pub use error::ParseError;
pub use parser::parse;
pub use playback::Playback;
pub use types::{Command, RobotState, SimulationPlan, Vector3, VelocityCommand, WaitCommand};
