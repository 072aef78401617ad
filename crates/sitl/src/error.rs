/// Errors raised by the motion collaborators and propagated unchanged by
/// the routines that drive them.
#[derive(Debug, thiserror::Error)]
pub enum MotionError {
    #[error("Velocity sink unavailable: {0}")]
    SinkUnavailable(String),

    #[error("Failed to publish velocity command: {0}")]
    Publish(String),

    #[error("Delay interrupted: {0}")]
    DelayInterrupted(String),

    #[error("Invalid duration: {0}s")]
    InvalidDuration(f64),

    #[error("Invalid time scale factor: {0}")]
    InvalidTimeScale(f32),
}

/// Errors loading a runtime configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid {name}: {value} (must be a non-negative number)")]
    InvalidLimit { name: &'static str, value: f64 },
}
