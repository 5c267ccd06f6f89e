//! Tool session - the runtime state machine of the active tool.
//!
//! A session turns trigger edges and ticks into fire sequences. It owns the
//! sound and description cursors, the hold timer and the set of playbacks it
//! started. It is created when a tool becomes active and thrown away when the
//! user switches tools, so nothing carries over between activations.
//!
//! Every method runs on the control thread. Playback completion from the
//! audio driver must be marshalled back onto that thread and delivered via
//! [`ToolSession::playback_complete`].

use std::sync::Arc;
use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, instrument, warn};

use super::definition::ToolDefinition;
use super::descriptions;
use super::error::{DispatchError, ToolError};
use super::hold::HoldTimer;
use super::outputs::{AudioOut, Outputs, PlaybackHandle};
use super::selector::{self, RandomSource};

/// Trigger state as seen by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerState {
    Idle,
    /// Pressed on a tool that supports hold.
    Held,
}

/// What one fire sequence did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FireReport {
    /// Sound that was dispatched, if any.
    pub sound: Option<String>,

    /// Handle of the playback that was started, if the dispatch succeeded.
    pub playback: Option<PlaybackHandle>,

    /// Playbacks stopped to make room for the new one.
    pub preempted: Vec<PlaybackHandle>,

    /// Commands that failed. The sequence ran to the end regardless.
    pub errors: Vec<DispatchError>,
}

impl FireReport {
    /// Whether every command of the sequence went through.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// The state machine driving one active tool.
pub struct ToolSession<R: RandomSource = StdRng> {
    definition: Arc<ToolDefinition>,
    sound_cursor: usize,
    description_cursor: usize,
    state: TriggerState,
    pressed: bool,
    hold: HoldTimer,
    active_playback: Vec<PlaybackHandle>,
    rng: R,
}

impl ToolSession<StdRng> {
    /// Create a session seeded from the operating system.
    pub fn new(definition: Arc<ToolDefinition>) -> Self {
        Self::with_rng(definition, StdRng::from_os_rng())
    }
}

impl<R: RandomSource> ToolSession<R> {
    /// Create a session drawing random sound picks from `rng`.
    pub fn with_rng(definition: Arc<ToolDefinition>, rng: R) -> Self {
        let hold = HoldTimer::new(definition.hold, definition.replay_interval());
        Self {
            definition,
            sound_cursor: 0,
            description_cursor: 0,
            state: TriggerState::Idle,
            pressed: false,
            hold,
            active_playback: Vec::new(),
            rng,
        }
    }

    pub fn definition(&self) -> &Arc<ToolDefinition> {
        &self.definition
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn state(&self) -> TriggerState {
        self.state
    }

    /// Playbacks started by this session that have not completed yet.
    pub fn active_playback(&self) -> &[PlaybackHandle] {
        &self.active_playback
    }

    /// When the last fire was due, used for replay timing.
    pub fn last_fire_time(&self) -> Option<Instant> {
        self.hold.last_fire()
    }

    /// Trigger pressed.
    ///
    /// Fires once. A hold tool moves to [`TriggerState::Held`], any other tool
    /// stays idle. A second press without a release in between is ignored.
    pub fn trigger_down<O>(&mut self, now: Instant, out: &mut O) -> Result<FireReport, ToolError>
    where
        O: Outputs + ?Sized,
    {
        if self.pressed {
            return Err(ToolError::invalid_state(format!(
                "trigger already down on '{}'",
                self.definition.name
            )));
        }
        self.pressed = true;

        let should_fire = self.hold.on_trigger_down(now);
        if self.definition.hold {
            self.state = TriggerState::Held;
        }

        if should_fire {
            Ok(self.fire(out))
        } else {
            Ok(FireReport::default())
        }
    }

    /// Trigger released. Cancels pending replays; running sounds play out.
    pub fn trigger_up(&mut self, _now: Instant) -> Result<(), ToolError> {
        if !self.pressed {
            return Err(ToolError::invalid_state(format!(
                "trigger released while idle on '{}'",
                self.definition.name
            )));
        }
        self.pressed = false;
        self.hold.on_trigger_up();
        self.state = TriggerState::Idle;
        Ok(())
    }

    /// Periodic tick. Re-fires a held hold tool when its replay is due.
    pub fn tick<O>(&mut self, now: Instant, out: &mut O) -> Option<FireReport>
    where
        O: Outputs + ?Sized,
    {
        if self.state != TriggerState::Held {
            return None;
        }
        if self.hold.on_tick(now) {
            debug!(tool = %self.definition.name, "Hold replay due");
            Some(self.fire(out))
        } else {
            None
        }
    }

    /// A playback started by this session finished on its own.
    pub fn playback_complete(&mut self, handle: PlaybackHandle) -> Result<(), ToolError> {
        match self.active_playback.iter().position(|h| *h == handle) {
            Some(index) => {
                self.active_playback.remove(index);
                Ok(())
            }
            None => Err(ToolError::invalid_state(format!(
                "{handle} is not playing on '{}'",
                self.definition.name
            ))),
        }
    }

    /// Stop every playback this session started.
    pub fn stop_all<A>(&mut self, audio: &mut A) -> Vec<DispatchError>
    where
        A: AudioOut + ?Sized,
    {
        let mut errors = Vec::new();
        for handle in self.active_playback.drain(..) {
            if let Err(e) = audio.stop(handle) {
                warn!("Failed to stop {}: {}", handle, e);
                errors.push(e);
            }
        }
        errors
    }

    /// Run one fire sequence: preempt, sound, text, light, motor.
    #[instrument(skip_all, fields(tool = %self.definition.name))]
    fn fire<O>(&mut self, out: &mut O) -> FireReport
    where
        O: Outputs + ?Sized,
    {
        let definition = Arc::clone(&self.definition);
        let mut report = FireReport::default();

        // At most one playback when overlap is off. A handle whose stop
        // failed is dropped all the same.
        if !definition.sound_overlap && !self.active_playback.is_empty() {
            for handle in self.active_playback.drain(..) {
                if let Err(e) = out.stop(handle) {
                    report.errors.push(e);
                }
                report.preempted.push(handle);
            }
        }

        let (sound, cursor) = selector::select(&definition, self.sound_cursor, &mut self.rng);
        self.sound_cursor = cursor;
        if let Some(sound) = sound {
            report.sound = Some(sound.to_string());
            match out.play(sound) {
                Ok(handle) => {
                    self.active_playback.push(handle);
                    report.playback = Some(handle);
                }
                Err(e) => report.errors.push(e),
            }
        }

        let (text, cursor) = descriptions::next(&definition, self.description_cursor);
        self.description_cursor = cursor;
        if let Some(text) = text {
            if let Err(e) = out.show(text) {
                report.errors.push(e);
            }
        }

        if definition.light {
            if let Err(e) = out.pulse_light() {
                report.errors.push(e);
            }
        }

        if definition.motor {
            if let Err(e) = out.run_motor() {
                report.errors.push(e);
            }
        }

        for e in &report.errors {
            warn!("{}", e);
        }
        debug!(sound = ?report.sound, "Fired");

        report
    }
}
