//! Input events and the line protocol every input source speaks.

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::error::{InputError, InputResult};

/// A discrete event delivered to the control loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    TriggerDown,
    TriggerUp,
    Shutdown,
}

/// Parse one protocol line.
///
/// Blank lines yield no events. `click` is a full press and release.
pub fn parse_line(line: &str) -> InputResult<Vec<InputEvent>> {
    let command = line.trim().to_lowercase();
    let events = match command.as_str() {
        "" => vec![],
        "down" | "d" | "press" => vec![InputEvent::TriggerDown],
        "up" | "u" | "release" => vec![InputEvent::TriggerUp],
        "click" | "c" => vec![InputEvent::TriggerDown, InputEvent::TriggerUp],
        "quit" | "q" | "exit" => vec![InputEvent::Shutdown],
        _ => return Err(InputError::unknown_command(line.trim())),
    };
    Ok(events)
}

/// Read protocol lines from `reader` and forward their events to `tx`.
///
/// Returns at end of input, after a shutdown command, or once the control
/// loop has gone away. Unknown lines are logged and skipped.
pub async fn pump<R>(reader: R, tx: &mpsc::Sender<InputEvent>, source: &str) -> InputResult<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        let events = match parse_line(&line) {
            Ok(events) => events,
            Err(e) => {
                warn!("Ignoring input from {}: {}", source, e);
                continue;
            }
        };

        for event in events {
            debug!("Input from {}: {:?}", source, event);
            if tx.send(event).await.is_err() {
                return Ok(());
            }
            if event == InputEvent::Shutdown {
                return Ok(());
            }
        }
    }
    debug!("Input from {} closed", source);
    Ok(())
}
