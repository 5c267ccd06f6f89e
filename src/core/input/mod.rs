//! Input layer for the control loop.
//!
//! This module provides different sources of trigger edges:
//! - **STDIO**: commands typed on the terminal (default, simulator) - feature: `stdio`
//! - **TCP**: line-delimited commands from remote buttons - feature: `tcp`
//!
//! Every source speaks the same line protocol (see `event.rs`) and forwards
//! events over an mpsc channel, so all state changes happen on the control
//! loop and never inside a source.
//!
//! # Feature Flags
//!
//! Input implementations are conditionally compiled based on features:
//! - `stdio` (default): STDIO input - minimal dependencies
//! - `tcp`: TCP input - adds tokio/net

mod config;
mod error;
pub mod event;
mod service;

#[cfg(feature = "tcp")]
pub mod tcp;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::InputConfig;
pub use error::{InputError, InputResult};
pub use event::{InputEvent, parse_line};
pub use service::InputService;

// Re-export configs for convenience
#[cfg(feature = "tcp")]
pub use config::TcpConfig;
