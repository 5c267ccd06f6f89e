//! Input service - orchestrates different input sources.
//!
//! This service provides a unified interface for feeding trigger events into
//! the control loop from whichever source is configured.

use tokio::sync::mpsc;
use tracing::info;

use super::event::InputEvent;
use super::{InputConfig, InputResult};

#[cfg(feature = "stdio")]
use super::stdio::StdioInput;

#[cfg(feature = "tcp")]
use super::tcp::TcpInput;

/// Input service - manages the input layer for the control loop.
pub struct InputService {
    config: InputConfig,
}

impl InputService {
    /// Create a new input service with the given configuration.
    pub fn new(config: InputConfig) -> Self {
        Self { config }
    }

    /// Log information about the configured input.
    pub fn log_info(&self) {
        info!("Starting input: {}", self.config.description());
    }

    /// Feed events from the configured source into `tx`.
    ///
    /// This method runs until the source ends or the receiver is dropped.
    pub async fn run(self, tx: mpsc::Sender<InputEvent>) -> InputResult<()> {
        self.log_info();

        match self.config {
            #[cfg(feature = "stdio")]
            InputConfig::Stdio => StdioInput::run(tx).await,
            #[cfg(feature = "tcp")]
            InputConfig::Tcp(cfg) => TcpInput::new(cfg).run(tx).await,
        }
    }
}
