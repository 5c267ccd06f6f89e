//! The control loop.
//!
//! Input events and ticks are serialized onto one task, so the tool state is
//! only ever touched from here.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{info, warn};

use super::app::App;
use super::input::InputEvent;

/// Control loop settings.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// Time between two ticks.
    pub tick_period: Duration,
    /// Warn whenever a tick starts late by more than one period.
    pub log_drop: bool,
}

/// Drive `app` until a shutdown command or Ctrl-C arrives.
///
/// The app is handed back torn down, with the active tool's sounds stopped.
pub async fn run(mut app: App, mut events: mpsc::Receiver<InputEvent>, options: RunOptions) -> App {
    let mut interval = time::interval(options.tick_period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut input_open = true;
    info!("Control loop running at {:?} per tick", options.tick_period);

    loop {
        tokio::select! {
            event = events.recv(), if input_open => match event {
                Some(InputEvent::Shutdown) => {
                    info!("Shutdown requested");
                    break;
                }
                Some(event) => app.handle(event),
                None => {
                    info!("Input closed, waiting for Ctrl-C");
                    input_open = false;
                }
            },
            scheduled = interval.tick() => {
                if options.log_drop {
                    let late = Instant::now().saturating_duration_since(scheduled);
                    if late > options.tick_period {
                        warn!("Tick drop: running {:?} behind", late);
                    }
                }
                app.update();
            }
            _ = &mut ctrl_c => {
                info!("Interrupted");
                break;
            }
        }
    }

    app.shutdown();
    app
}
