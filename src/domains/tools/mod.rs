//! Tools domain module.
//!
//! This module holds the tool runtime: the static tool definitions and the
//! state machine that turns trigger edges into sound, text, light and motor
//! commands.
//!
//! ## Architecture
//!
//! - `definition.rs` - The configured behaviour of one tool
//! - `selector.rs` - Next-sound selection (random or round-robin)
//! - `descriptions.rs` - Looping description text
//! - `hold.rs` - Hold-and-replay timing
//! - `session.rs` - The per-activation state machine and fire sequence
//! - `slot.rs` - Owner of the single active session
//! - `outputs.rs` - Collaborator traits the session dispatches to
//! - `registry.rs` - Validated list of configured tools
//! - `error.rs` - Tool-specific error types

pub mod definition;
pub mod descriptions;
mod error;
pub mod hold;
pub mod outputs;
mod registry;
pub mod selector;
pub mod session;
pub mod slot;

pub use definition::{SCREEN_HEIGHT, SCREEN_WIDTH, SoundOrder, ToolDefinition};
pub use descriptions::DisplayText;
pub use error::{Channel, DispatchError, ToolError};
pub use hold::HoldTimer;
pub use outputs::{ActuatorOut, AudioOut, DisplayOut, Outputs, PlaybackHandle};
pub use registry::{MAX_PRELOADED_TOOLS, ToolRegistry};
pub use selector::RandomSource;
pub use session::{FireReport, ToolSession, TriggerState};
pub use slot::ToolSlot;
