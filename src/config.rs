//! Configuration management for gesture control

use crate::constants::{
    DEFAULT_BLINK_THRESHOLD, DEFAULT_COOLDOWN_SECONDS, DEFAULT_LOG_PATH, DEFAULT_MOUTH_OPEN_THRESHOLD,
    DEFAULT_TICK_MS,
};
use crate::gesture::ClassifierThresholds;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Classifier threshold configuration
    pub classifier: ClassifierConfig,

    /// Debounce gate configuration
    pub gate: GateConfig,

    /// Session loop configuration
    pub session: SessionConfig,

    /// Session log configuration
    pub log: LogConfig,
}

/// Face gesture threshold parameters.
///
/// Both thresholds compare distances in normalized frame coordinates, so
/// they drift with face size and distance from the camera. Tune per setup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Eye opening below this counts as closed (0.0-1.0)
    pub blink_threshold: f32,

    /// Mouth opening above this counts as open (0.0-1.0)
    pub mouth_open_threshold: f32,
}

/// Debounce gate parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Minimum elapsed seconds between two dispatched actions, shared
    /// across all sources
    pub cooldown_seconds: f64,
}

/// Session loop parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Presentation-loop tick interval in milliseconds
    pub tick_ms: u64,
}

/// Session log parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Write a log row per dispatched action
    pub enabled: bool,

    /// Log file location
    pub path: PathBuf,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            blink_threshold: DEFAULT_BLINK_THRESHOLD,
            mouth_open_threshold: DEFAULT_MOUTH_OPEN_THRESHOLD,
        }
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            cooldown_seconds: DEFAULT_COOLDOWN_SECONDS,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { tick_ms: DEFAULT_TICK_MS }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: PathBuf::from(DEFAULT_LOG_PATH),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        serde_yaml::from_str(&content).map_err(|e| Error::Config(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content =
            serde_yaml::to_string(self).map_err(|e| Error::Config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Classifier thresholds in the form the classifier consumes
    #[must_use]
    pub fn classifier_thresholds(&self) -> ClassifierThresholds {
        ClassifierThresholds {
            blink: self.classifier.blink_threshold,
            mouth_open: self.classifier.mouth_open_threshold,
        }
    }

    /// Cooldown window as a duration
    #[must_use]
    pub fn cooldown(&self) -> Duration {
        Duration::from_secs_f64(self.gate.cooldown_seconds)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.classifier.blink_threshold) {
            return Err(Error::Config(
                "Blink threshold must be between 0.0 and 1.0".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.classifier.mouth_open_threshold) {
            return Err(Error::Config(
                "Mouth open threshold must be between 0.0 and 1.0".to_string(),
            ));
        }

        if !self.gate.cooldown_seconds.is_finite() || self.gate.cooldown_seconds < 0.0 {
            return Err(Error::Config(
                "Cooldown seconds must be finite and non-negative".to_string(),
            ));
        }

        if self.session.tick_ms == 0 {
            return Err(Error::Config("Tick interval must be greater than 0".to_string()));
        }

        if self.log.enabled && self.log.path.as_os_str().is_empty() {
            return Err(Error::Config("Log path must not be empty".to_string()));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Gesture Control Configuration

# Face gesture thresholds (normalized frame coordinates; tune per setup)
classifier:
  blink_threshold: 0.012
  mouth_open_threshold: 0.04

# Debounce gate
gate:
  cooldown_seconds: 1.5

# Session loop
session:
  tick_ms: 30

# Session log
log:
  enabled: true
  path: "logs/gesture_log.csv"
"#;
