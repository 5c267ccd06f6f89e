//! Tool-specific error types.

use std::fmt;

use thiserror::Error;

/// Output channel a command was dispatched to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Audio,
    Display,
    Light,
    Motor,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Audio => "audio",
            Self::Display => "display",
            Self::Light => "light",
            Self::Motor => "motor",
        };
        f.write_str(name)
    }
}

/// A collaborator failed to carry out one command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{channel} dispatch failed: {message}")]
pub struct DispatchError {
    pub channel: Channel,
    pub message: String,
}

impl DispatchError {
    /// Create a new dispatch error for the given channel.
    pub fn new(channel: Channel, message: impl Into<String>) -> Self {
        Self {
            channel,
            message: message.into(),
        }
    }
}

/// Errors that can occur while configuring or driving a tool.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ToolError {
    /// The tool definition is malformed. Raised at load time only.
    #[error("Invalid tool '{tool}': {reason}")]
    Configuration { tool: String, reason: String },

    /// An output command failed. The fire sequence carried on regardless.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// An event arrived that makes no sense in the current state.
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl ToolError {
    /// Create a new configuration error.
    pub fn configuration(tool: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Configuration {
            tool: tool.into(),
            reason: reason.into(),
        }
    }

    /// Create a new "invalid state" error.
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    /// Whether this error only signals an ignored event.
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, Self::InvalidState(_))
    }
}
