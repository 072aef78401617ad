//! Runtime configuration.
//!
//! Loaded from an optional TOML file; command-line flags override the file.
//!
//! ```toml
//! time_mode = "scaled"
//! scale_factor = 4.0
//! fps = 30
//! max_speed = 1.5
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::delay::TimeMode;
use crate::error::ConfigError;
use crate::sink::KinematicConfig;

/// Time mode selector as written in config files and on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum TimeModeSetting {
    #[default]
    Simulated,
    RealTime,
    Scaled,
}

/// Settings for the `robosim` runtime.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SitlConfig {
    pub time_mode: TimeModeSetting,
    /// Wall-clock speed-up used with `time_mode = "scaled"`.
    pub scale_factor: f32,
    /// Frame rate for timeline playback.
    pub fps: u32,
    /// Forward speed limit in m/s. Unlimited when absent.
    pub max_speed: Option<f64>,
    /// Yaw rate limit in rad/s. Unlimited when absent.
    pub max_turn_rate: Option<f64>,
}

impl Default for SitlConfig {
    fn default() -> Self {
        Self {
            time_mode: TimeModeSetting::Simulated,
            scale_factor: 1.0,
            fps: 60,
            max_speed: None,
            max_turn_rate: None,
        }
    }
}

impl SitlConfig {
    /// Read a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&text)?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate TOML text.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject kinematic limits that cannot bound a command.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("max_speed", self.max_speed),
            ("max_turn_rate", self.max_turn_rate),
        ] {
            if let Some(value) = value {
                if value.is_nan() || value < 0.0 {
                    return Err(ConfigError::InvalidLimit { name, value });
                }
            }
        }
        Ok(())
    }

    /// Resolved delay behaviour.
    pub fn time_mode(&self) -> TimeMode {
        match self.time_mode {
            TimeModeSetting::Simulated => TimeMode::Simulated,
            TimeModeSetting::RealTime => TimeMode::RealTime,
            TimeModeSetting::Scaled => TimeMode::Scaled {
                factor: self.scale_factor,
            },
        }
    }

    /// Limits for a [`KinematicSink`](crate::sink::KinematicSink).
    pub fn kinematic(&self) -> KinematicConfig {
        let defaults = KinematicConfig::default();
        KinematicConfig {
            max_speed: self.max_speed.unwrap_or(defaults.max_speed),
            max_turn_rate: self.max_turn_rate.unwrap_or(defaults.max_turn_rate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = SitlConfig::from_toml("").unwrap();
        assert_eq!(config, SitlConfig::default());
        assert_eq!(config.time_mode(), TimeMode::Simulated);
    }

    #[test]
    fn test_scaled_mode_uses_factor() {
        let config = SitlConfig::from_toml(
            r#"
time_mode = "scaled"
scale_factor = 4.0
fps = 30
max_speed = 1.5
"#,
        )
        .unwrap();
        assert_eq!(config.time_mode(), TimeMode::Scaled { factor: 4.0 });
        assert_eq!(config.fps, 30);
        assert_eq!(config.kinematic().max_speed, 1.5);
        assert!(config.kinematic().max_turn_rate.is_infinite());
    }

    #[test]
    fn test_real_time_spelling() {
        let config = SitlConfig::from_toml(r#"time_mode = "real-time""#).unwrap();
        assert_eq!(config.time_mode(), TimeMode::RealTime);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = SitlConfig::from_toml("warp = 9").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_negative_limit_is_rejected() {
        let err = SitlConfig::from_toml("max_speed = -1.0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidLimit { name: "max_speed", value } if value == -1.0
        ));
    }

    #[test]
    fn test_nan_limit_is_rejected() {
        let err = SitlConfig::from_toml("max_turn_rate = nan").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidLimit {
                name: "max_turn_rate",
                ..
            }
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = SitlConfig::load(Path::new("/nonexistent/robosim.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
