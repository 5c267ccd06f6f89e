//! Configuration management for the toolgun.
//!
//! This module provides a centralized configuration structure populated from
//! a JSON configuration file, environment variables, and defaults.

use super::error::{Error, Result};
use super::input::InputConfig;
use crate::domains::tools::ToolDefinition;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure for the toolgun.
///
/// This struct contains all configurable aspects of the device, organized
/// by concern. Every section is optional in the file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Where trigger edges come from.
    #[serde(default)]
    pub input: InputConfig,

    /// Content directory and shared content.
    #[serde(default)]
    pub content: ContentConfig,

    /// Control loop timing.
    #[serde(default)]
    pub timing: TimingConfig,

    /// Light and motor pulse lengths.
    #[serde(default)]
    pub hardware: HardwareConfig,

    /// Sounds played by the device itself rather than by a tool.
    #[serde(default)]
    pub system_sounds: SystemSounds,

    /// The tools, in cycling order.
    #[serde(default)]
    pub tools: Vec<ToolDefinition>,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Content directory configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Directory every sound and background is resolved against.
    pub root: PathBuf,

    /// Background for tools that do not name one.
    pub default_background: Option<String>,
}

/// Control loop timing, in Hz and seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Ticks per second.
    pub refresh_rate: f64,

    /// How long the trigger must be held to cycle to the next tool.
    pub tool_change_timeout: f64,

    /// Idle time before the display goes to sleep.
    pub sleep_timeout: f64,
}

/// Actuator pulse lengths, in seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HardwareConfig {
    /// How long the barrel light stays on per pulse.
    pub flash_duration: f64,

    /// How long the motor spins per pulse.
    pub spin_duration: f64,
}

/// Device sounds, relative to the content directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemSounds {
    /// Played when cycling to the next tool.
    pub next: Option<String>,

    /// Played when the trigger is released after cycling.
    pub equip: Option<String>,

    /// Played once at start-up.
    pub startup: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("content"),
            default_background: None,
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            refresh_rate: 30.0,
            tool_change_timeout: 1.0,
            sleep_timeout: 300.0,
        }
    }
}

impl Default for HardwareConfig {
    fn default() -> Self {
        Self {
            flash_duration: 0.1,
            spin_duration: 0.2,
        }
    }
}

impl TimingConfig {
    /// Time between two ticks.
    pub fn tick_period(&self) -> Duration {
        seconds(1.0 / self.refresh_rate)
    }

    pub fn tool_change_timeout(&self) -> Duration {
        seconds(self.tool_change_timeout)
    }

    pub fn sleep_timeout(&self) -> Duration {
        seconds(self.sleep_timeout)
    }
}

impl HardwareConfig {
    pub fn flash_duration(&self) -> Duration {
        seconds(self.flash_duration)
    }

    pub fn spin_duration(&self) -> Duration {
        seconds(self.spin_duration)
    }
}

/// Convert seconds to a duration, clamping negatives to zero.
pub fn seconds(secs: f64) -> Duration {
    Duration::try_from_secs_f64(secs.max(0.0)).unwrap_or(Duration::MAX)
}

impl Config {
    /// Load configuration from a JSON file, then apply environment overrides.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("cannot read config file {}: {}", path.display(), e))
        })?;
        let mut config: Self = serde_json::from_str(&text)?;
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables only.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Apply environment overrides.
    ///
    /// Environment variables are expected to be prefixed with `TOOLGUN_`.
    /// For example: `TOOLGUN_LOG_LEVEL`, `TOOLGUN_CONTENT_DIR`.
    pub fn apply_env(&mut self) {
        dotenvy::dotenv().ok();

        if let Ok(level) = std::env::var("TOOLGUN_LOG_LEVEL") {
            self.logging.level = level;
        }

        if let Ok(root) = std::env::var("TOOLGUN_CONTENT_DIR") {
            self.content.root = PathBuf::from(root);
        }

        if std::env::var("TOOLGUN_INPUT").is_ok() {
            self.input = InputConfig::from_env();
        }
    }

    /// Reject settings the control loop cannot run with.
    pub fn validate(&self) -> Result<()> {
        let rate = self.timing.refresh_rate;
        if !rate.is_finite() || rate <= 0.0 {
            return Err(Error::config(format!(
                "refresh_rate must be a positive number, got {rate}"
            )));
        }
        if self.timing.tick_period().is_zero() {
            return Err(Error::config(format!(
                "refresh_rate {rate} is too high for the control loop timer"
            )));
        }
        for (name, value) in [
            ("tool_change_timeout", self.timing.tool_change_timeout),
            ("sleep_timeout", self.timing.sleep_timeout),
            ("flash_duration", self.hardware.flash_duration),
            ("spin_duration", self.hardware.spin_duration),
        ] {
            if value.is_nan() || value < 0.0 {
                return Err(Error::config(format!(
                    "{name} must be a non-negative number of seconds, got {value}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::SoundOrder;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    const SAMPLE: &str = r#"{
        "content": { "root": "assets", "default_background": "background.png" },
        "timing": { "refresh_rate": 20, "tool_change_timeout": 1.5 },
        "system_sounds": { "next": "next.wav", "equip": "equip.wav" },
        "tools": [
            {
                "name": "Paint",
                "sounds": ["sprayer.wav"],
                "sound_order": "selective",
                "sound_overlap": false,
                "descriptions": [null, "Paint some more stuff"],
                "motor": false
            },
            { "name": "Thruster", "hold": true, "sound_replay": 0.5 }
        ]
    }"#;

    #[test]
    fn test_load_from_file() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, SAMPLE).unwrap();

        let config = Config::load(&path).unwrap();

        assert_eq!(config.tools.len(), 2);
        assert_eq!(config.tools[0].sound_order, SoundOrder::Selective);
        assert!(!config.tools[0].motor);
        assert!(config.tools[1].hold);
        assert_eq!(config.timing.tick_period(), Duration::from_millis(50));
        assert_eq!(config.timing.tool_change_timeout(), Duration::from_millis(1500));
        // Unset sections keep their defaults
        assert_eq!(config.timing.sleep_timeout, 300.0);
        assert_eq!(config.hardware.flash_duration, 0.1);
        assert_eq!(config.system_sounds.startup, None);
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let result = Config::load(&dir.path().join("nope.json"));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_malformed_file_is_json_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ \"tools\": [ { \"sounds\": [] } ] }").unwrap();
        assert!(matches!(Config::load(&path), Err(Error::Json(_))));
    }

    #[test]
    fn test_zero_refresh_rate_rejected() {
        let mut config = Config::default();
        config.timing.refresh_rate = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_refresh_rate_with_zero_tick_rejected() {
        let mut config = Config::default();
        config.timing.refresh_rate = 1e12;
        assert!(config.timing.tick_period().is_zero());
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        config.timing.refresh_rate = 1000.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_negative_duration_rejected() {
        let mut config = Config::default();
        config.hardware.spin_duration = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_content_dir_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("TOOLGUN_CONTENT_DIR", "/opt/toolgun/content");
        }
        let config = Config::from_env();
        assert_eq!(config.content.root, PathBuf::from("/opt/toolgun/content"));
        unsafe {
            std::env::remove_var("TOOLGUN_CONTENT_DIR");
        }
    }

    #[test]
    fn test_log_level_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("TOOLGUN_LOG_LEVEL", "debug");
        }
        let config = Config::from_env();
        assert_eq!(config.logging.level, "debug");
        unsafe {
            std::env::remove_var("TOOLGUN_LOG_LEVEL");
        }
    }

    #[test]
    fn test_seconds_clamps_negative() {
        assert_eq!(seconds(-1.0), Duration::ZERO);
        assert_eq!(seconds(0.25), Duration::from_millis(250));
        assert_eq!(seconds(f64::INFINITY), Duration::MAX);
    }
}
