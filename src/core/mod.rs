//! Core module containing shared infrastructure components.
//!
//! This module provides the foundational building blocks for the toolgun,
//! including error handling, configuration, the input layer, and the
//! application controller with its control loop.

pub mod app;
pub mod clock;
pub mod config;
pub mod error;
pub mod input;
pub mod runtime;
pub mod security;

pub use app::App;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use error::{Error, Result};
pub use input::{InputConfig, InputEvent, InputService};
pub use runtime::{RunOptions, run};
pub use security::{ContentPathError, resolve_content};
