//! STDIO input implementation.
//!
//! Reads trigger commands typed on the terminal - the simulator mode.

use tokio::io::BufReader;
use tokio::sync::mpsc;
use tracing::info;

use super::InputResult;
use super::event::{InputEvent, pump};

/// STDIO input handler.
pub struct StdioInput;

impl StdioInput {
    /// Run the STDIO input until stdin closes or `quit` is typed.
    pub async fn run(tx: mpsc::Sender<InputEvent>) -> InputResult<()> {
        info!("Ready - type 'down', 'up', 'click' or 'quit'");

        pump(BufReader::new(tokio::io::stdin()), &tx, "stdin").await?;

        info!("STDIO input finished");
        Ok(())
    }
}
