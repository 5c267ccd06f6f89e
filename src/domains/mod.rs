//! Domains module containing the prop's behaviour organized by concern.
//!
//! - **tools**: tool definitions and the per-tool state machine
//! - **hardware**: the output drivers the tools dispatch to

pub mod hardware;
pub mod tools;
