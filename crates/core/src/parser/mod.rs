//! Command script parsing.
//!
//! Accepts three loosely specified input styles and lowers all of them into
//! a [`SimulationPlan`]:
//!
//! - function-call scripts (`cmd_vel(1.0, 0.5)`, `sleep(2.0)`) as found in
//!   Python or C++ ROS nodes
//! - XML-ish tags and key/value lines (`<wait duration="2" />`,
//!   `drive linear: 1.0 angular: 0.5`)
//! - JSON, either a bare command array or an object with a `commands` array
//!
//! Script parsing is heuristic and line based: anything that does not look
//! like a velocity or wait command is skipped.

mod json;
mod script;

use crate::error::ParseError;
use crate::types::SimulationPlan;

pub use json::parse_json;
pub use script::parse_script;

/// Parse a command script or JSON plan.
///
/// Input that starts with `[`, or starts with `{` and mentions a
/// `"commands"` key, is treated as JSON. Everything else is parsed as a
/// line-oriented script.
pub fn parse(input: &str) -> Result<SimulationPlan, ParseError> {
    let trimmed = input.trim();
    if looks_like_json(trimmed) {
        parse_json(trimmed)
    } else {
        Ok(parse_script(trimmed))
    }
}

fn looks_like_json(trimmed: &str) -> bool {
    trimmed.starts_with('[') || (trimmed.starts_with('{') && trimmed.contains("\"commands\""))
}
