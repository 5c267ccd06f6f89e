//! Barrel light and motor.
//!
//! Each pulse switches its output on and records when it should go off;
//! [`SimulatedGpio::update`] switches expired outputs off on every tick.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::core::clock::Clock;
use crate::core::config::HardwareConfig;
use crate::domains::tools::{ActuatorOut, DispatchError};

/// One timed output pin.
#[derive(Debug, Default)]
struct Pin {
    on: bool,
    off_at: Option<Instant>,
}

impl Pin {
    fn pulse(&mut self, now: Instant, length: Duration) {
        self.on = true;
        self.off_at = Some(now + length);
    }

    /// Returns true when the pin just went off.
    fn update(&mut self, now: Instant) -> bool {
        match self.off_at {
            Some(off_at) if now > off_at => {
                self.on = false;
                self.off_at = None;
                true
            }
            _ => false,
        }
    }
}

/// Light and motor outputs driven from the clock.
pub struct SimulatedGpio {
    flash: Duration,
    spin: Duration,
    clock: Arc<dyn Clock>,
    led: Pin,
    motor: Pin,
}

impl SimulatedGpio {
    pub fn new(config: &HardwareConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            flash: config.flash_duration(),
            spin: config.spin_duration(),
            clock,
            led: Pin::default(),
            motor: Pin::default(),
        }
    }

    pub fn led_on(&self) -> bool {
        self.led.on
    }

    pub fn motor_on(&self) -> bool {
        self.motor.on
    }

    /// Switch off every output whose pulse has run out.
    pub fn update(&mut self, now: Instant) {
        if self.led.update(now) {
            debug!("LED: Off");
        }
        if self.motor.update(now) {
            debug!("MOTOR: Off");
        }
    }
}

impl ActuatorOut for SimulatedGpio {
    fn pulse_light(&mut self) -> Result<(), DispatchError> {
        self.led.pulse(self.clock.now(), self.flash);
        debug!("LED: On");
        Ok(())
    }

    fn run_motor(&mut self) -> Result<(), DispatchError> {
        self.motor.pulse(self.clock.now(), self.spin);
        debug!("MOTOR: On");
        Ok(())
    }
}
