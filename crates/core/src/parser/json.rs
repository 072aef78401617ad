use serde_json::Value;

use crate::error::ParseError;
use crate::types::{Command, SimulationPlan};

/// Parse a JSON plan.
///
/// Accepts `[cmd, ...]`, `{"commands": [cmd, ...]}`, or a single command
/// object (an object whose `commands` field is not an array).
pub fn parse_json(input: &str) -> Result<SimulationPlan, ParseError> {
    let value: Value = serde_json::from_str(input)?;
    let commands: Vec<Command> = if value.is_array() {
        serde_json::from_value(value)?
    } else if let Some(list) = value.get("commands").filter(|c| c.is_array()) {
        serde_json::from_value(list.clone())?
    } else {
        vec![serde_json::from_value(value)?]
    };

    for (index, cmd) in commands.iter().enumerate() {
        if let Some(value) = cmd.duration() {
            if !value.is_finite() || value < 0.0 {
                return Err(ParseError::InvalidDuration { index, value });
            }
        }
    }

    log::debug!("parsed JSON plan with {} commands", commands.len());
    Ok(SimulationPlan::new(commands))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Vector3, VelocityCommand};

    #[test]
    fn test_bare_array() {
        let plan = parse_json(
            r#"[
                {"type": "VELOCITY", "linear": {"x": 1.0, "y": 0, "z": 0}, "angular": {"x": 0, "y": 0, "z": 0.5}},
                {"type": "WAIT", "duration": 2.0}
            ]"#,
        )
        .unwrap();
        assert_eq!(
            plan.commands,
            vec![Command::velocity(1.0, 0.5), Command::wait(2.0)]
        );
        assert_eq!(plan.total_duration, 2.0);
    }

    #[test]
    fn test_commands_object_with_timed_velocity() {
        let plan = parse_json(
            r#"{"commands": [
                {"type": "VELOCITY", "linear": {"x": 0.4}, "angular": {"z": -0.2}, "duration": 1.5},
                {"type": "WAIT", "duration": 0.5}
            ]}"#,
        )
        .unwrap();
        let expected = VelocityCommand {
            linear: Vector3::new(0.4, 0.0, 0.0),
            angular: Vector3::new(0.0, 0.0, -0.2),
            duration: Some(1.5),
        };
        assert_eq!(plan.commands[0], Command::Velocity(expected));
        assert_eq!(plan.total_duration, 2.0);
    }

    #[test]
    fn test_non_array_commands_field_is_single_command() {
        let plan = parse_json(r#"{"type": "WAIT", "duration": 3, "commands": "none"}"#).unwrap();
        assert_eq!(plan.commands, vec![Command::wait(3.0)]);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let err = parse_json(r#"[{"type": "WAIT", "duration": }]"#).unwrap_err();
        assert!(matches!(err, ParseError::Json(_)));
    }

    #[test]
    fn test_unknown_command_type_is_an_error() {
        let err = parse_json(r#"[{"type": "TELEPORT"}]"#).unwrap_err();
        assert!(matches!(err, ParseError::Json(_)));
    }

    #[test]
    fn test_negative_duration_is_rejected() {
        let err = parse_json(r#"[{"type": "WAIT", "duration": 1}, {"type": "WAIT", "duration": -2}]"#)
            .unwrap_err();
        match err {
            ParseError::InvalidDuration { index, value } => {
                assert_eq!(index, 1);
                assert_eq!(value, -2.0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
