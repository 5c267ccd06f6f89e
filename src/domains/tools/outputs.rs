//! Outward collaborator interfaces.
//!
//! A session never touches drivers directly. It dispatches commands through
//! these traits, and every command may fail with a [`DispatchError`].

use std::fmt;

use super::descriptions::DisplayText;
use super::error::DispatchError;

/// Identifies one running sound playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlaybackHandle(pub u64);

impl fmt::Display for PlaybackHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "playback#{}", self.0)
    }
}

/// Plays sounds. Playback is asynchronous: completion is reported later as
/// a `playback_complete` event on the control thread.
pub trait AudioOut {
    fn play(&mut self, sound: &str) -> Result<PlaybackHandle, DispatchError>;
    fn stop(&mut self, handle: PlaybackHandle) -> Result<(), DispatchError>;
}

/// Shows description text.
pub trait DisplayOut {
    fn show(&mut self, text: DisplayText<'_>) -> Result<(), DispatchError>;
}

/// Barrel light and motor.
pub trait ActuatorOut {
    fn pulse_light(&mut self) -> Result<(), DispatchError>;
    fn run_motor(&mut self) -> Result<(), DispatchError>;
}

/// Everything a fire sequence dispatches to.
pub trait Outputs: AudioOut + DisplayOut + ActuatorOut {}

impl<T: AudioOut + DisplayOut + ActuatorOut> Outputs for T {}
