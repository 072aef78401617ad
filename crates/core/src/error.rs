/// Errors produced while turning a command script into a plan.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("JSON plan error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid duration {value} for command {index}")]
    InvalidDuration { index: usize, value: f64 },
}
