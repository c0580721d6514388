//! Demo configuration
//!
//! JSON-backed settings for pipeline playback and viewer behavior. Every
//! field has a default so partial files are accepted.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

/// How pipeline progress advances on each tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepFunction {
    /// Constant percentage per tick
    Fixed { increment: f32 },
    /// Seeded random percentage in `(0, max]` per tick
    Jitter { max: f32 },
}

impl StepFunction {
    /// Upper bound of a single step
    pub fn max_step(&self) -> f32 {
        match self {
            Self::Fixed { increment } => *increment,
            Self::Jitter { max } => *max,
        }
    }

    fn validate(&self) -> CoreResult<()> {
        let step = self.max_step();
        if !step.is_finite() || step <= 0.0 {
            return Err(CoreError::InvalidConfig(format!(
                "step must be a positive finite percentage, got {}",
                step
            )));
        }
        Ok(())
    }
}

impl Default for StepFunction {
    fn default() -> Self {
        Self::Fixed { increment: 5.0 }
    }
}

/// Showcase configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Pipeline tick interval in milliseconds
    pub tick_interval_ms: u64,
    /// Progress stepping function
    pub step: StepFunction,
    /// Maximum ticks processed per update (catch-up bound)
    pub max_ticks_per_update: u32,
    /// Seed for every simulated random value
    pub seed: u64,
    /// Viewer auto-rotation speed in radians per second
    pub auto_rotate_speed: f32,
    /// Preset selected when a session starts
    pub default_preset: String,
    /// Start viewers in wireframe mode
    pub wireframe: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 100,
            step: StepFunction::default(),
            max_ticks_per_update: 8,
            seed: 42,
            auto_rotate_speed: 0.5,
            default_preset: String::from("character"),
            wireframe: false,
        }
    }
}

impl DemoConfig {
    /// Load and validate a configuration file
    pub fn load(path: &Path) -> CoreResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        log::debug!("Loaded demo config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate configuration JSON
    pub fn from_json_str(text: &str) -> CoreResult<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> CoreResult<()> {
        if self.tick_interval_ms == 0 {
            return Err(CoreError::InvalidConfig(
                "tick_interval_ms must be greater than zero".into(),
            ));
        }
        if self.max_ticks_per_update == 0 {
            return Err(CoreError::InvalidConfig(
                "max_ticks_per_update must be greater than zero".into(),
            ));
        }
        if !self.auto_rotate_speed.is_finite() {
            return Err(CoreError::InvalidConfig(
                "auto_rotate_speed must be finite".into(),
            ));
        }
        self.step.validate()
    }

    /// Tick interval as a duration
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = DemoConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tick_interval(), Duration::from_millis(100));
        assert_eq!(config.step, StepFunction::Fixed { increment: 5.0 });
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = DemoConfig::from_json_str(r#"{ "seed": 7, "wireframe": true }"#).unwrap();
        assert_eq!(config.seed, 7);
        assert!(config.wireframe);
        assert_eq!(config.tick_interval_ms, 100);
        assert_eq!(config.default_preset, "character");
    }

    #[test]
    fn test_jitter_step_parses() {
        let config =
            DemoConfig::from_json_str(r#"{ "step": { "kind": "jitter", "max": 25.0 } }"#).unwrap();
        assert_eq!(config.step, StepFunction::Jitter { max: 25.0 });
        assert_eq!(config.step.max_step(), 25.0);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            DemoConfig::from_json_str(r#"{ "tick_interval_ms": 0 }"#),
            Err(CoreError::InvalidConfig(_))
        ));
        assert!(matches!(
            DemoConfig::from_json_str(r#"{ "step": { "kind": "fixed", "increment": -1.0 } }"#),
            Err(CoreError::InvalidConfig(_))
        ));
        assert!(matches!(
            DemoConfig::from_json_str("not json"),
            Err(CoreError::JsonError(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let result = DemoConfig::load(Path::new("/nonexistent/amao.json"));
        assert!(matches!(result, Err(CoreError::IoError(_))));
    }
}
