//! Tool definition - the static behaviour policy of one tool.
//!
//! A definition is deserialized from the `tools` list of the configuration
//! file with every default already applied, validated once, and then shared
//! read-only by every session that activates it.

use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::ToolError;

/// Width of the screen and of every background image, in pixels.
pub const SCREEN_WIDTH: u32 = 240;

/// Height of the screen and of every background image, in pixels.
pub const SCREEN_HEIGHT: u32 = 320;

/// Order in which a tool picks its next sound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SoundOrder {
    /// Any sound, chosen uniformly.
    #[default]
    Random,
    /// Round-robin through `sounds` in listed order.
    Selective,
}

/// Description of one tool's behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ToolDefinition {
    /// Display name of the tool.
    pub name: String,

    /// Sound files (WAV, relative to the content directory).
    #[serde(default)]
    pub sounds: Vec<String>,

    /// How the next sound is picked.
    #[serde(default)]
    pub sound_order: SoundOrder,

    /// Whether a new fire may play over a sound that is still running.
    #[serde(default = "default_true")]
    pub sound_overlap: bool,

    /// Texts shown one per fire, looping. `null` clears the text.
    #[serde(default)]
    pub descriptions: Vec<Option<String>>,

    /// Background image (240x320), relative to the content directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,

    /// Whether holding the trigger keeps the tool active.
    #[serde(default)]
    pub hold: bool,

    /// Seconds between automatic re-fires while held. Needs `hold`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound_replay: Option<f64>,

    /// Flash the barrel light on fire.
    #[serde(default = "default_true")]
    pub light: bool,

    /// Spin the motor on fire.
    #[serde(default = "default_true")]
    pub motor: bool,
}

fn default_true() -> bool {
    true
}

impl ToolDefinition {
    /// Create a definition with the given name and every other field defaulted.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sounds: Vec::new(),
            sound_order: SoundOrder::default(),
            sound_overlap: true,
            descriptions: Vec::new(),
            background: None,
            hold: false,
            sound_replay: None,
            light: true,
            motor: true,
        }
    }

    /// Check the definition for errors that would make it unusable.
    pub fn validate(&self) -> Result<(), ToolError> {
        if self.name.trim().is_empty() {
            return Err(ToolError::configuration("<unnamed>", "name must not be empty"));
        }

        for sound in &self.sounds {
            if sound.trim().is_empty() {
                return Err(ToolError::configuration(&self.name, "empty sound entry"));
            }
            if !is_wave_file(sound) {
                return Err(ToolError::configuration(
                    &self.name,
                    format!("only wave files are supported ({sound})"),
                ));
            }
        }

        if let Some(replay) = self.sound_replay {
            if !replay.is_finite() || replay < 0.0 {
                return Err(ToolError::configuration(
                    &self.name,
                    format!("sound_replay must be a non-negative number of seconds, got {replay}"),
                ));
            }
            if !self.hold {
                debug!(tool = %self.name, "sound_replay has no effect without hold");
            }
        }

        Ok(())
    }

    /// Interval between automatic re-fires while the trigger is held.
    ///
    /// `None` when the tool does not hold or has no replay set. Negative values
    /// count as zero (re-fire every tick).
    pub fn replay_interval(&self) -> Option<Duration> {
        if !self.hold {
            return None;
        }
        let secs = self.sound_replay?;
        Duration::try_from_secs_f64(secs.max(0.0)).ok()
    }
}

/// Whether a sound file name carries a `.wav` extension.
pub fn is_wave_file(name: &str) -> bool {
    std::path::Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("wav"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied_on_deserialize() {
        let def: ToolDefinition = serde_json::from_str(r#"{ "name": "Weld" }"#).unwrap();
        assert_eq!(def, ToolDefinition::new("Weld"));
        assert_eq!(def.sound_order, SoundOrder::Random);
        assert!(def.sound_overlap);
        assert!(def.light);
        assert!(def.motor);
        assert!(!def.hold);
    }

    #[test]
    fn test_null_description_is_none_marker() {
        let def: ToolDefinition = serde_json::from_str(
            r#"{ "name": "Paint", "descriptions": [null, "Paint some more stuff"] }"#,
        )
        .unwrap();
        assert_eq!(
            def.descriptions,
            vec![None, Some("Paint some more stuff".to_string())]
        );
    }

    #[test]
    fn test_selective_order_parses() {
        let def: ToolDefinition = serde_json::from_str(
            r#"{ "name": "Paint", "sounds": ["sprayer.wav"], "sound_order": "selective" }"#,
        )
        .unwrap();
        assert_eq!(def.sound_order, SoundOrder::Selective);
    }

    #[test]
    fn test_unknown_order_rejected() {
        let result: Result<ToolDefinition, _> =
            serde_json::from_str(r#"{ "name": "Paint", "sound_order": "shuffle" }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_empty_name() {
        let def = ToolDefinition::new("  ");
        assert!(matches!(def.validate(), Err(ToolError::Configuration { .. })));
    }

    #[test]
    fn test_validate_rejects_non_wave_sound() {
        let mut def = ToolDefinition::new("Remover");
        def.sounds = vec!["zap.mp3".to_string()];
        let err = def.validate().unwrap_err();
        assert!(err.to_string().contains("only wave files"));
    }

    #[test]
    fn test_validate_rejects_negative_replay() {
        let mut def = ToolDefinition::new("Thruster");
        def.hold = true;
        def.sound_replay = Some(-1.0);
        assert!(def.validate().is_err());
    }

    #[test]
    fn test_replay_inert_without_hold() {
        let mut def = ToolDefinition::new("Thruster");
        def.sound_replay = Some(0.5);
        assert!(def.validate().is_ok());
        assert_eq!(def.replay_interval(), None);
    }

    #[test]
    fn test_replay_interval_with_hold() {
        let mut def = ToolDefinition::new("Thruster");
        def.hold = true;
        assert_eq!(def.replay_interval(), None);

        def.sound_replay = Some(0.25);
        assert_eq!(def.replay_interval(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn test_negative_replay_treated_as_zero() {
        let mut def = ToolDefinition::new("Thruster");
        def.hold = true;
        def.sound_replay = Some(-3.0);
        assert_eq!(def.replay_interval(), Some(Duration::ZERO));
    }

    #[test]
    fn test_is_wave_file_case_insensitive() {
        assert!(is_wave_file("sprayer.wav"));
        assert!(is_wave_file("sfx/SPRAYER.WAV"));
        assert!(!is_wave_file("sprayer.ogg"));
        assert!(!is_wave_file("wav"));
    }
}
