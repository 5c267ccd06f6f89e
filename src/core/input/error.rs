//! Input error types.

use thiserror::Error;

/// Result type for input operations.
pub type InputResult<T> = Result<T, InputError>;

/// Errors that can occur in input operations.
#[derive(Debug, Error)]
pub enum InputError {
    /// Failed to bind to address.
    #[error("Failed to bind to {address}: {source}")]
    BindError {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// IO error while reading input.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// A line that is not a known command.
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
}

impl InputError {
    /// Create a bind error.
    pub fn bind(address: impl Into<String>, source: std::io::Error) -> Self {
        Self::BindError {
            address: address.into(),
            source,
        }
    }

    /// Create an unknown command error.
    pub fn unknown_command(line: impl Into<String>) -> Self {
        Self::UnknownCommand(line.into())
    }
}
