//! Timeline playback over an analysed script.
//!
//! Holds the script source, the plan produced by the last successful
//! analysis, and a playback clock. A frame loop calls [`Playback::tick`]
//! with its frame delta and receives the robot pose to display.

use crate::engine::SimulationEngine;
use crate::error::ParseError;
use crate::parser;
use crate::types::{RobotState, SimulationPlan};

/// Sample program shown before any script has been loaded.
pub const SAMPLE_SCRIPT: &str = "\
// Sample Robot Code
// Drive forward at 1m/s for 2 seconds
cmd_vel(1.0, 0.0)
wait(2.0)

// Turn 90 degrees (pi/2 ~= 1.57) over 1 second
cmd_vel(0.0, 1.57)
wait(1.0)

// Drive in a circle
cmd_vel(1.0, 1.0)
wait(4.0)

// Stop
cmd_vel(0.0, 0.0)
";

/// Playback controller.
#[derive(Debug)]
pub struct Playback {
    code: String,
    engine: Option<SimulationEngine>,
    is_playing: bool,
    playback_time: f64,
    simulation_duration: f64,
}

impl Playback {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            engine: None,
            is_playing: false,
            playback_time: 0.0,
            simulation_duration: 0.0,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// Replace the script source. The current plan is kept until the next
    /// [`analyze`](Self::analyze).
    pub fn set_code(&mut self, code: impl Into<String>) {
        self.code = code.into();
    }

    /// Parse the current source and rebuild the engine.
    ///
    /// On success the timeline is rewound and playback stops. On failure
    /// the previous plan and timeline are left untouched.
    pub fn analyze(&mut self) -> Result<&SimulationPlan, ParseError> {
        let plan = parser::parse(&self.code)?;
        log::info!(
            "analysed plan: {} commands, {:.2}s",
            plan.len(),
            plan.total_duration
        );
        self.simulation_duration = plan.total_duration;
        self.playback_time = 0.0;
        self.is_playing = false;
        let engine = self.engine.insert(SimulationEngine::new(plan));
        Ok(engine.plan())
    }

    /// Plan from the last successful analysis.
    pub fn plan(&self) -> Option<&SimulationPlan> {
        self.engine.as_ref().map(SimulationEngine::plan)
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.is_playing = playing;
    }

    /// Flip between play and pause.
    pub fn toggle(&mut self) {
        self.is_playing = !self.is_playing;
    }

    pub fn playback_time(&self) -> f64 {
        self.playback_time
    }

    /// Jump to an absolute position on the timeline.
    pub fn set_playback_time(&mut self, time: f64) {
        self.playback_time = time;
    }

    pub fn simulation_duration(&self) -> f64 {
        self.simulation_duration
    }

    /// Rewind to t = 0 and stop.
    pub fn reset(&mut self) {
        self.playback_time = 0.0;
        self.is_playing = false;
    }

    /// Advance one frame of `delta` seconds.
    ///
    /// While playing, the clock advances and is clamped to the end of the
    /// plan, where playback stops by itself. Returns the pose at the
    /// (possibly unchanged) playback time, or `None` before any analysis.
    pub fn tick(&mut self, delta: f64) -> Option<RobotState> {
        let engine = self.engine.as_mut()?;

        if self.is_playing {
            let mut next = self.playback_time + delta;
            if next >= self.simulation_duration {
                next = self.simulation_duration;
                self.is_playing = false;
            }
            self.playback_time = next;
        }

        Some(engine.step(self.playback_time))
    }
}

impl Default for Playback {
    fn default() -> Self {
        Self::new(SAMPLE_SCRIPT)
    }
}
