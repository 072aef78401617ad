use std::sync::LazyLock;

use regex::Regex;

use crate::types::{Command, SimulationPlan};

/// `wait(t)`, `sleep(t)`, `delay t`, `<wait duration="t" />`, ...
static WAIT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)(?:wait|sleep|delay)(?:_command)?.*?(?:duration|time|seconds|s|val)?\s*[=:(]?\s*["']?([0-9]+\.?[0-9]*)["']?"#,
    )
    .expect("wait pattern is valid")
});

/// `cmd_vel(v, w)` / `velocity(v, w)`.
static CALL_VEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:cmd_vel|velocity)\s*\(\s*(-?[0-9]+\.?[0-9]*)\s*,\s*(-?[0-9]+\.?[0-9]*)")
        .expect("call pattern is valid")
});

/// Attribute or key/value forms: `<cmd_vel linear="v" angular="w"/>`,
/// `drive linear: v angular: w`.
static LOOSE_VEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)(?:cmd_vel|velocity|move|drive)(?:_command)?.*?(?:linear|x|v|val)?\s*[=:]?\s*["']?(-?[0-9]+\.?[0-9]*)["']?.*?(?:angular|z|w|rot)?\s*[=:]?\s*["']?(-?[0-9]+\.?[0-9]*)["']?"#,
    )
    .expect("loose pattern is valid")
});

/// Movement keywords that must literally appear (case-sensitive) before the
/// loose pattern is trusted.
const MOTION_HINTS: [&str; 3] = ["vel", "move", "drive"];

/// Parse a line-oriented command script.
///
/// Never fails: lines that do not look like a command are skipped.
pub fn parse_script(input: &str) -> SimulationPlan {
    let commands: Vec<Command> = input.lines().filter_map(parse_line).collect();
    log::debug!("parsed script with {} commands", commands.len());
    SimulationPlan::new(commands)
}

fn parse_line(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() || is_comment(line) {
        return None;
    }

    // Waits first: their pattern is the narrowest.
    if let Some(duration) = WAIT_RE.captures(line).and_then(|c| number(c.get(1))) {
        return Some(Command::wait(duration));
    }

    if let Some(caps) = CALL_VEL_RE.captures(line) {
        if let (Some(v), Some(w)) = (number(caps.get(1)), number(caps.get(2))) {
            return Some(Command::velocity(v, w));
        }
    }

    if MOTION_HINTS.iter().any(|hint| line.contains(hint)) {
        if let Some(caps) = LOOSE_VEL_RE.captures(line) {
            if let (Some(v), Some(w)) = (number(caps.get(1)), number(caps.get(2))) {
                return Some(Command::velocity(v, w));
            }
        }
    }

    log::trace!("skipping line: {line}");
    None
}

fn is_comment(line: &str) -> bool {
    line.starts_with('#') || line.starts_with("//") || line.starts_with("<!--")
}

fn number(m: Option<regex::Match<'_>>) -> Option<f64> {
    m.and_then(|m| m.as_str().parse().ok())
}
