//! Audio output.
//!
//! Sounds are probed once with lofty when their tool is loaded; playback is
//! simulated from the probed durations. Finished playbacks are polled by the
//! control loop and handed to the session as `playback_complete`.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use lofty::prelude::*;
use tracing::{debug, info, instrument};

use super::error::ContentError;
use crate::core::clock::Clock;
use crate::core::security::resolve_content;
use crate::domains::tools::definition::is_wave_file;
use crate::domains::tools::{AudioOut, Channel, DispatchError, PlaybackHandle, ToolDefinition};

// ============================================================================
// Sound Bank
// ============================================================================

/// Loaded sounds and their lengths.
#[derive(Debug)]
pub struct SoundBank {
    root: PathBuf,
    durations: HashMap<String, Duration>,
}

impl SoundBank {
    /// Create an empty bank reading from the content directory `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            durations: HashMap::new(),
        }
    }

    /// Load one sound. Loading an already loaded sound is a no-op.
    pub fn load(&mut self, name: &str) -> Result<Duration, ContentError> {
        if let Some(duration) = self.durations.get(name) {
            return Ok(*duration);
        }
        if !is_wave_file(name) {
            return Err(ContentError::unsupported_format(name));
        }

        let path = resolve_content(&self.root, name)?;
        let duration = probe_duration(name, &path)?;
        debug!("Loaded sound {} ({:?})", name, duration);
        self.durations.insert(name.to_string(), duration);
        Ok(duration)
    }

    /// Load every sound of a tool.
    #[instrument(skip_all, fields(tool = %definition.name))]
    pub fn load_tool(&mut self, definition: &ToolDefinition) -> Result<(), ContentError> {
        for sound in &definition.sounds {
            self.load(sound)?;
        }
        debug!("Loaded all tool content");
        Ok(())
    }

    /// Whether every sound of `definition` is loaded.
    pub fn has_tool(&self, definition: &ToolDefinition) -> bool {
        definition.sounds.iter().all(|s| self.durations.contains_key(s))
    }

    /// Length of a loaded sound.
    pub fn duration(&self, name: &str) -> Option<Duration> {
        self.durations.get(name).copied()
    }

    /// Insert a sound with a known length, bypassing the filesystem.
    pub fn insert(&mut self, name: impl Into<String>, duration: Duration) {
        self.durations.insert(name.into(), duration);
    }
}

/// Read the length of an audio file.
fn probe_duration(name: &str, path: &Path) -> Result<Duration, ContentError> {
    let tagged_file =
        lofty::read_from_path(path).map_err(|e| ContentError::audio(name, e.to_string()))?;
    Ok(tagged_file.properties().duration())
}

// ============================================================================
// Simulated Audio
// ============================================================================

#[derive(Debug)]
struct Playback {
    sound: String,
    ends_at: Instant,
}

/// Audio output that tracks playbacks against the clock instead of a sound card.
pub struct SimulatedAudio {
    bank: SoundBank,
    clock: Arc<dyn Clock>,
    playing: BTreeMap<PlaybackHandle, Playback>,
    next_handle: u64,
}

impl SimulatedAudio {
    pub fn new(bank: SoundBank, clock: Arc<dyn Clock>) -> Self {
        Self {
            bank,
            clock,
            playing: BTreeMap::new(),
            next_handle: 0,
        }
    }

    pub fn bank(&self) -> &SoundBank {
        &self.bank
    }

    pub fn bank_mut(&mut self) -> &mut SoundBank {
        &mut self.bank
    }

    /// Number of sounds currently playing.
    pub fn playing(&self) -> usize {
        self.playing.len()
    }

    pub fn is_playing(&self, handle: PlaybackHandle) -> bool {
        self.playing.contains_key(&handle)
    }

    /// Remove and return every playback that has run to its end by `now`.
    pub fn finished(&mut self, now: Instant) -> Vec<PlaybackHandle> {
        let done: Vec<_> = self
            .playing
            .iter()
            .filter(|(_, p)| p.ends_at <= now)
            .map(|(h, _)| *h)
            .collect();
        for handle in &done {
            if let Some(playback) = self.playing.remove(handle) {
                debug!("Finished {} ({})", playback.sound, handle);
            }
        }
        done
    }
}

impl AudioOut for SimulatedAudio {
    fn play(&mut self, sound: &str) -> Result<PlaybackHandle, DispatchError> {
        let duration = self
            .bank
            .duration(sound)
            .ok_or_else(|| DispatchError::new(Channel::Audio, format!("sound not loaded: {sound}")))?;

        self.next_handle += 1;
        let handle = PlaybackHandle(self.next_handle);
        let ends_at = self.clock.now() + duration;
        self.playing.insert(
            handle,
            Playback {
                sound: sound.to_string(),
                ends_at,
            },
        );
        info!("Playing {} ({})", sound, handle);
        Ok(handle)
    }

    fn stop(&mut self, handle: PlaybackHandle) -> Result<(), DispatchError> {
        // Stopping a playback that already ended is fine.
        if let Some(playback) = self.playing.remove(&handle) {
            debug!("Stopped {} ({})", playback.sound, handle);
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::clock::ManualClock;
    use std::fs;
    use tempfile::TempDir;

    /// Write a mono 16-bit PCM WAV file of `samples` samples at 8 kHz.
    pub(crate) fn write_wav(path: &Path, samples: u32) {
        let sample_rate: u32 = 8000;
        let data_len = samples * 2;
        let mut bytes = Vec::with_capacity(44 + data_len as usize);
        bytes.extend_from_slice(b"RIFF");
        bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
        bytes.extend_from_slice(b"WAVE");
        bytes.extend_from_slice(b"fmt ");
        bytes.extend_from_slice(&16u32.to_le_bytes());
        bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
        bytes.extend_from_slice(&1u16.to_le_bytes()); // mono
        bytes.extend_from_slice(&sample_rate.to_le_bytes());
        bytes.extend_from_slice(&(sample_rate * 2).to_le_bytes());
        bytes.extend_from_slice(&2u16.to_le_bytes());
        bytes.extend_from_slice(&16u16.to_le_bytes());
        bytes.extend_from_slice(b"data");
        bytes.extend_from_slice(&data_len.to_le_bytes());
        bytes.resize(44 + data_len as usize, 0);
        fs::write(path, bytes).unwrap();
    }

    fn audio_with(sounds: &[(&str, u64)], clock: Arc<ManualClock>) -> SimulatedAudio {
        let mut bank = SoundBank::new("unused");
        for (name, ms) in sounds {
            bank.insert(*name, Duration::from_millis(*ms));
        }
        SimulatedAudio::new(bank, clock)
    }

    #[test]
    fn test_load_probes_wav_duration() {
        let dir = TempDir::new().unwrap();
        write_wav(&dir.path().join("sprayer.wav"), 8000);

        let mut bank = SoundBank::new(dir.path());
        let duration = bank.load("sprayer.wav").unwrap();

        assert!(duration >= Duration::from_millis(900));
        assert!(duration <= Duration::from_millis(1100));
        assert_eq!(bank.duration("sprayer.wav"), Some(duration));
    }

    #[test]
    fn test_load_rejects_non_wave() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("zap.mp3"), "not audio").unwrap();

        let mut bank = SoundBank::new(dir.path());
        assert!(matches!(
            bank.load("zap.mp3"),
            Err(ContentError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let mut bank = SoundBank::new(dir.path());
        assert!(matches!(bank.load("gone.wav"), Err(ContentError::Path(_))));
    }

    #[test]
    fn test_load_corrupt_wave() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("broken.wav"), "definitely not riff").unwrap();

        let mut bank = SoundBank::new(dir.path());
        assert!(matches!(
            bank.load("broken.wav"),
            Err(ContentError::Audio { .. })
        ));
    }

    #[test]
    fn test_load_tool_and_has_tool() {
        let dir = TempDir::new().unwrap();
        write_wav(&dir.path().join("a.wav"), 800);
        write_wav(&dir.path().join("b.wav"), 800);

        let mut def = ToolDefinition::new("Paint");
        def.sounds = vec!["a.wav".to_string(), "b.wav".to_string()];

        let mut bank = SoundBank::new(dir.path());
        assert!(!bank.has_tool(&def));
        bank.load_tool(&def).unwrap();
        assert!(bank.has_tool(&def));
    }

    #[test]
    fn test_playback_finishes_after_duration() {
        let clock = Arc::new(ManualClock::new());
        let mut audio = audio_with(&[("sprayer.wav", 500)], clock.clone());

        let handle = audio.play("sprayer.wav").unwrap();
        assert!(audio.is_playing(handle));
        assert!(audio.finished(clock.now()).is_empty());

        clock.advance(Duration::from_millis(500));
        assert_eq!(audio.finished(clock.now()), vec![handle]);
        assert_eq!(audio.playing(), 0);
    }

    #[test]
    fn test_stop_removes_playback() {
        let clock = Arc::new(ManualClock::new());
        let mut audio = audio_with(&[("sprayer.wav", 500)], clock.clone());

        let handle = audio.play("sprayer.wav").unwrap();
        audio.stop(handle).unwrap();
        assert!(!audio.is_playing(handle));

        clock.advance(Duration::from_secs(1));
        assert!(audio.finished(clock.now()).is_empty());
        // Stopping twice is harmless
        assert!(audio.stop(handle).is_ok());
    }

    #[test]
    fn test_play_unloaded_sound_fails() {
        let clock = Arc::new(ManualClock::new());
        let mut audio = audio_with(&[], clock);

        let err = audio.play("missing.wav").unwrap_err();
        assert_eq!(err.channel, Channel::Audio);
    }
}
