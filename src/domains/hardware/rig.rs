//! The full set of outputs on the prop.

use std::sync::Arc;

use crate::core::clock::Clock;
use crate::core::config::Config;
use crate::domains::tools::{
    ActuatorOut, AudioOut, DispatchError, DisplayOut, DisplayText, PlaybackHandle,
};

use super::audio::{SimulatedAudio, SoundBank};
use super::display::ConsoleDisplay;
use super::gpio::SimulatedGpio;

/// Audio, display and actuators bundled for the fire sequence.
pub struct Rig {
    pub audio: SimulatedAudio,
    pub display: ConsoleDisplay,
    pub gpio: SimulatedGpio,
}

impl Rig {
    /// Build the simulated rig described by `config`. No content is loaded yet.
    pub fn simulated(config: &Config, clock: Arc<dyn Clock>) -> Self {
        Self {
            audio: SimulatedAudio::new(SoundBank::new(config.content.root.clone()), clock.clone()),
            display: ConsoleDisplay::new(),
            gpio: SimulatedGpio::new(&config.hardware, clock),
        }
    }
}

impl AudioOut for Rig {
    fn play(&mut self, sound: &str) -> Result<PlaybackHandle, DispatchError> {
        self.audio.play(sound)
    }

    fn stop(&mut self, handle: PlaybackHandle) -> Result<(), DispatchError> {
        self.audio.stop(handle)
    }
}

impl DisplayOut for Rig {
    fn show(&mut self, text: DisplayText<'_>) -> Result<(), DispatchError> {
        self.display.show(text)
    }
}

impl ActuatorOut for Rig {
    fn pulse_light(&mut self) -> Result<(), DispatchError> {
        self.gpio.pulse_light()
    }

    fn run_motor(&mut self) -> Result<(), DispatchError> {
        self.gpio.run_motor()
    }
}
