//! Toolgun prop runtime.
//!
//! This crate drives a handheld prop with a single trigger. A configured list
//! of tools each turn trigger presses into sound, screen text, a light flash
//! and a motor pulse; holding the trigger cycles to the next tool.
//!
//! # Architecture
//!
//! - **core**: Configuration, error handling, the input layer, the
//!   application controller and the control loop
//! - **domains**: Behaviour organized by concern
//!   - **tools**: Tool definitions and the per-activation state machine
//!   - **hardware**: Audio, display and GPIO drivers
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use toolgun::core::{App, Config, RunOptions, SystemClock, run};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load(std::path::Path::new("config.json"))?;
//!     let app = App::new(&config, Arc::new(SystemClock))?;
//!     let (_tx, rx) = tokio::sync::mpsc::channel(64);
//!     let options = RunOptions {
//!         tick_period: config.timing.tick_period(),
//!         log_drop: false,
//!     };
//!     run(app, rx, options).await;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{App, Config, Error, Result};
