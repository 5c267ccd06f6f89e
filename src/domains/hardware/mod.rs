//! Hardware domain module.
//!
//! Drivers behind the collaborator traits of the tools domain. Low-level
//! sample output and pin toggling are simulated: each driver keeps its
//! state in memory and logs what a real device would do.
//!
//! - `audio.rs` - Sound bank (lofty-probed WAV files) and playback tracking
//! - `display.rs` - Screen content and sleep state
//! - `gpio.rs` - Timed light and motor pulses
//! - `rig.rs` - All outputs bundled for the fire sequence
//! - `error.rs` - Content-loading error types

pub mod audio;
pub mod display;
mod error;
pub mod gpio;
pub mod rig;

pub use audio::{SimulatedAudio, SoundBank};
pub use display::ConsoleDisplay;
pub use error::ContentError;
pub use gpio::SimulatedGpio;
pub use rig::Rig;
