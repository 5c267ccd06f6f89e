//! Tool slot - owns the single active tool session.
//!
//! This is the inward interface of the tool runtime: `activate`,
//! `deactivate` and the trigger events. Whoever switches tools owns the slot;
//! there is no global "current tool".

use std::sync::Arc;
use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, instrument};

use super::definition::ToolDefinition;
use super::error::{DispatchError, ToolError};
use super::outputs::{AudioOut, Outputs, PlaybackHandle};
use super::selector::RandomSource;
use super::session::{FireReport, ToolSession};

/// Builds the random source for each new session.
pub type RngFactory<R> = Box<dyn FnMut() -> R + Send>;

/// Holds at most one live [`ToolSession`].
pub struct ToolSlot<R: RandomSource = StdRng> {
    session: Option<ToolSession<R>>,
    make_rng: RngFactory<R>,
}

impl ToolSlot<StdRng> {
    /// Create an empty slot whose sessions are seeded from the OS.
    pub fn new() -> Self {
        Self::with_rng_factory(Box::new(StdRng::from_os_rng))
    }
}

impl Default for ToolSlot<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RandomSource> ToolSlot<R> {
    /// Create an empty slot using `make_rng` for every new session.
    pub fn with_rng_factory(make_rng: RngFactory<R>) -> Self {
        Self {
            session: None,
            make_rng,
        }
    }

    /// The live session, if a tool is active.
    pub fn session(&self) -> Option<&ToolSession<R>> {
        self.session.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Make `definition` the active tool with fresh cursors.
    ///
    /// The previous session, if any, is deactivated first.
    #[instrument(skip_all, fields(tool = %definition.name))]
    pub fn activate<A>(&mut self, definition: Arc<ToolDefinition>, audio: &mut A) -> Vec<DispatchError>
    where
        A: AudioOut + ?Sized,
    {
        let errors = self.deactivate(audio);
        info!("Activating tool");
        let rng = (self.make_rng)();
        self.session = Some(ToolSession::with_rng(definition, rng));
        errors
    }

    /// Discard the active session, stopping whatever it is still playing.
    pub fn deactivate<A>(&mut self, audio: &mut A) -> Vec<DispatchError>
    where
        A: AudioOut + ?Sized,
    {
        match self.session.take() {
            Some(mut session) => {
                debug!(tool = %session.name(), "Deactivating tool");
                session.stop_all(audio)
            }
            None => Vec::new(),
        }
    }

    pub fn trigger_down<O>(&mut self, now: Instant, out: &mut O) -> Result<FireReport, ToolError>
    where
        O: Outputs + ?Sized,
    {
        self.live_mut()?.trigger_down(now, out)
    }

    pub fn trigger_up(&mut self, now: Instant) -> Result<(), ToolError> {
        self.live_mut()?.trigger_up(now)
    }

    pub fn tick<O>(&mut self, now: Instant, out: &mut O) -> Option<FireReport>
    where
        O: Outputs + ?Sized,
    {
        self.session.as_mut()?.tick(now, out)
    }

    pub fn playback_complete(&mut self, handle: PlaybackHandle) -> Result<(), ToolError> {
        self.live_mut()?.playback_complete(handle)
    }

    fn live_mut(&mut self) -> Result<&mut ToolSession<R>, ToolError> {
        self.session
            .as_mut()
            .ok_or_else(|| ToolError::invalid_state("no active tool"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::outputs::testing::{Command, RecordingOutputs};
    use crate::domains::tools::selector::tests::FixedPicks;

    fn slot() -> ToolSlot<FixedPicks> {
        ToolSlot::with_rng_factory(Box::new(|| FixedPicks::new(vec![0])))
    }

    fn tool(name: &str, sounds: &[&str]) -> Arc<ToolDefinition> {
        let mut def = ToolDefinition::new(name);
        def.sounds = sounds.iter().map(|s| s.to_string()).collect();
        def.sound_order = crate::domains::tools::SoundOrder::Selective;
        Arc::new(def)
    }

    #[test]
    fn test_events_without_active_tool_are_invalid_state() {
        let mut slot = slot();
        let mut out = RecordingOutputs::new();
        let now = Instant::now();

        assert!(slot.trigger_down(now, &mut out).unwrap_err().is_invalid_state());
        assert!(slot.trigger_up(now).unwrap_err().is_invalid_state());
        assert!(slot.tick(now, &mut out).is_none());
        assert!(out.commands.is_empty());
    }

    #[test]
    fn test_switch_stops_playback_and_resets_cursors() {
        let mut slot = slot();
        let mut out = RecordingOutputs::new();
        let now = Instant::now();

        slot.activate(tool("Paint", &["a.wav", "b.wav"]), &mut out);
        slot.trigger_down(now, &mut out).unwrap();
        slot.trigger_up(now).unwrap();

        slot.activate(tool("Weld", &["w.wav"]), &mut out);
        assert!(out.commands.contains(&Command::Stop(PlaybackHandle(1))));
        assert_eq!(slot.session().unwrap().name(), "Weld");

        // Back to the first tool: selective order starts over.
        slot.activate(tool("Paint", &["a.wav", "b.wav"]), &mut out);
        let report = slot.trigger_down(now, &mut out).unwrap();
        assert_eq!(report.sound.as_deref(), Some("a.wav"));
    }

    #[test]
    fn test_deactivate_empties_slot() {
        let mut slot = slot();
        let mut out = RecordingOutputs::new();

        slot.activate(tool("Paint", &[]), &mut out);
        assert!(slot.is_active());
        assert!(slot.deactivate(&mut out).is_empty());
        assert!(!slot.is_active());
    }
}
