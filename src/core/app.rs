//! Application controller.
//!
//! The [`App`] sits between the input layer and the tool runtime. It owns the
//! tool registry, the slot holding the active tool, the output rig and the
//! clock, and it adds the device-level behaviour around the tools: cycling
//! to the next tool by holding the trigger, sleep mode, and the device's own
//! sounds.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, instrument, warn};

use super::clock::Clock;
use super::config::{Config, SystemSounds};
use super::error::Result;
use super::input::InputEvent;
use super::security::resolve_content;
use crate::domains::hardware::{ContentError, Rig};
use crate::domains::tools::{
    ActuatorOut, AudioOut, FireReport, ToolDefinition, ToolError, ToolRegistry, ToolSlot,
};

/// Extra window after the tool change timeout in which a second press on a
/// hold tool counts as a double press.
const DOUBLE_PRESS_GRACE: Duration = Duration::from_millis(500);

/// The toolgun application.
pub struct App {
    registry: ToolRegistry,
    slot: ToolSlot,
    rig: Rig,
    clock: Arc<dyn Clock>,

    content_root: PathBuf,
    default_background: Option<String>,
    system_sounds: SystemSounds,
    tool_change_timeout: Duration,
    sleep_timeout: Duration,

    current: usize,
    pressed: bool,
    /// Start of the current press, reset on every tool change while held.
    trigger_hold: Option<Instant>,
    /// Start of the previous press.
    last_trigger: Option<Instant>,
    changing_tool: bool,
    sleep_at: Instant,
    asleep: bool,
}

impl App {
    /// Create the application with the simulated rig.
    pub fn new(config: &Config, clock: Arc<dyn Clock>) -> Result<Self> {
        let rig = Rig::simulated(config, clock.clone());
        Self::with_rig(config, rig, clock)
    }

    /// Create the application on top of an existing rig.
    ///
    /// Content for the first tools and the system sounds is loaded here;
    /// sounds already in the rig's bank are not read again.
    pub fn with_rig(config: &Config, mut rig: Rig, clock: Arc<dyn Clock>) -> Result<Self> {
        let registry = ToolRegistry::new(config.tools.clone())?;

        for (index, definition) in registry.iter().enumerate() {
            if !ToolRegistry::is_preloaded(index) {
                break;
            }
            rig.audio.bank_mut().load_tool(definition)?;
            if let Some(background) = background_name(definition, &config.content.default_background) {
                resolve_content(&config.content.root, background).map_err(ContentError::from)?;
            }
        }

        let system_sounds = config.system_sounds.clone();
        for sound in [&system_sounds.next, &system_sounds.equip, &system_sounds.startup]
            .into_iter()
            .flatten()
        {
            rig.audio.bank_mut().load(sound)?;
        }

        let now = clock.now();
        let mut app = Self {
            registry,
            slot: ToolSlot::new(),
            rig,
            clock,
            content_root: config.content.root.clone(),
            default_background: config.content.default_background.clone(),
            system_sounds,
            tool_change_timeout: config.timing.tool_change_timeout(),
            sleep_timeout: config.timing.sleep_timeout(),
            current: 0,
            pressed: false,
            trigger_hold: None,
            last_trigger: None,
            changing_tool: false,
            sleep_at: now + config.timing.sleep_timeout(),
            asleep: false,
        };
        app.activate_current();
        Ok(app)
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn slot(&self) -> &ToolSlot {
        &self.slot
    }

    pub fn rig(&self) -> &Rig {
        &self.rig
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Definition of the tool at the current index.
    pub fn current_tool(&self) -> Option<&Arc<ToolDefinition>> {
        self.registry.get(self.current)
    }

    pub fn is_asleep(&self) -> bool {
        self.asleep
    }

    /// Play the start-up sound.
    pub fn startup(&mut self) {
        let sound = self.system_sounds.startup.clone();
        self.play_system(sound.as_deref());
    }

    /// Apply one input event.
    pub fn handle(&mut self, event: InputEvent) {
        let now = self.clock.now();
        match event {
            InputEvent::TriggerDown => self.trigger_down(now),
            InputEvent::TriggerUp => self.trigger_up(now),
            InputEvent::Shutdown => debug!("Shutdown is handled by the control loop"),
        }
    }

    /// One control loop tick.
    pub fn update(&mut self) {
        let now = self.clock.now();

        for handle in self.rig.audio.finished(now) {
            if let Err(e) = self.slot.playback_complete(handle) {
                // System sounds and playbacks of replaced sessions end up here.
                debug!("Untracked playback finished: {}", e);
            }
        }

        if self.pressed {
            self.update_held(now);
        }

        if !self.asleep && now >= self.sleep_at {
            info!("No user input, entering sleep mode");
            self.asleep = true;
            self.rig.display.sleep();
        }

        self.rig.gpio.update(now);
    }

    /// Stop the active tool and everything it is playing.
    pub fn shutdown(&mut self) {
        info!("Tearing down application");
        for e in self.slot.deactivate(&mut self.rig.audio) {
            warn!("{}", e);
        }
    }

    fn trigger_down(&mut self, now: Instant) {
        if self.pressed {
            debug!("Trigger already down");
            return;
        }
        self.pressed = true;
        self.note_activity(now);

        match self.slot.trigger_down(now, &mut self.rig) {
            Ok(report) => log_report(&report),
            Err(e) => log_tool_error(&e),
        }
        self.trigger_hold = Some(now);
    }

    fn trigger_up(&mut self, now: Instant) {
        if !self.pressed {
            debug!("Trigger already up");
            return;
        }
        self.pressed = false;
        self.note_activity(now);

        self.last_trigger = self.trigger_hold.take();
        if let Err(e) = self.slot.trigger_up(now) {
            log_tool_error(&e);
        }

        if self.changing_tool {
            self.changing_tool = false;
            let sound = self.system_sounds.equip.clone();
            self.play_system(sound.as_deref());
        }
    }

    fn update_held(&mut self, now: Instant) {
        let Some(hold_start) = self.trigger_hold else {
            return;
        };
        let held_for = now.saturating_duration_since(hold_start);

        let hold_tool = self.current_tool().filter(|def| def.hold).cloned();
        if let Some(definition) = hold_tool.filter(|_| !self.changing_tool) {
            if let Some(report) = self.slot.tick(now, &mut self.rig) {
                log_report(&report);
            }
            self.keep_actuators_on(&definition);

            // A hold tool only cycles on a double press held past the timeout.
            let double_press = self.last_trigger.is_some_and(|last| {
                now.saturating_duration_since(last) < DOUBLE_PRESS_GRACE + self.tool_change_timeout
            });
            if double_press && held_for > self.tool_change_timeout {
                self.trigger_hold = Some(now);
                self.next_tool();
            }
        } else if held_for > self.tool_change_timeout {
            self.trigger_hold = Some(now);
            self.next_tool();
        }
    }

    /// Re-pulse the light and motor so they stay on for the whole hold.
    fn keep_actuators_on(&mut self, definition: &ToolDefinition) {
        if definition.light {
            if let Err(e) = self.rig.gpio.pulse_light() {
                warn!("{}", e);
            }
        }
        if definition.motor {
            if let Err(e) = self.rig.gpio.run_motor() {
                warn!("{}", e);
            }
        }
    }

    /// Switch to the next tool and play the cycling sound.
    #[instrument(skip_all, fields(from = self.current))]
    fn next_tool(&mut self) {
        self.current = self.registry.next_index(self.current);
        self.activate_current();
        self.changing_tool = true;
        let sound = self.system_sounds.next.clone();
        self.play_system(sound.as_deref());
    }

    fn activate_current(&mut self) {
        let Some(definition) = self.current_tool().cloned() else {
            return;
        };

        if !self.rig.audio.bank().has_tool(&definition) {
            if let Err(e) = self.rig.audio.bank_mut().load_tool(&definition) {
                warn!("Failed to load content for '{}': {}", definition.name, e);
            }
        }

        let background = match background_name(&definition, &self.default_background) {
            Some(name) => match resolve_content(&self.content_root, name) {
                Ok(path) => Some(path),
                Err(e) => {
                    warn!("Background for '{}' unavailable: {}", definition.name, e);
                    None
                }
            },
            None => None,
        };
        self.rig.display.set_tool(&definition.name, background);

        for e in self.slot.activate(definition, &mut self.rig.audio) {
            warn!("{}", e);
        }
    }

    fn note_activity(&mut self, now: Instant) {
        self.sleep_at = now + self.sleep_timeout;
        if self.asleep {
            info!("Exiting sleep mode");
            self.asleep = false;
            self.rig.display.wake();
        }
    }

    fn play_system(&mut self, sound: Option<&str>) {
        if let Some(sound) = sound {
            if let Err(e) = self.rig.audio.play(sound) {
                warn!("{}", e);
            }
        }
    }
}

fn background_name<'a>(
    definition: &'a ToolDefinition,
    default_background: &'a Option<String>,
) -> Option<&'a str> {
    definition
        .background
        .as_deref()
        .or(default_background.as_deref())
}

fn log_report(report: &FireReport) {
    if !report.is_clean() {
        warn!("Fire finished with {} failed command(s)", report.errors.len());
    }
}

fn log_tool_error(error: &ToolError) {
    if error.is_invalid_state() {
        debug!("{}", error);
    } else {
        warn!("{}", error);
    }
}
