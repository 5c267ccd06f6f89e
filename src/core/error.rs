//! Error types and handling for the toolgun.
//!
//! This module defines a unified error type that can represent errors from
//! all domains and external dependencies, providing consistent error handling
//! across the entire application.

use thiserror::Error;

/// A specialized Result type for toolgun operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the toolgun.
///
/// This enum captures every error that can stop the device from starting.
/// Once running, dispatch failures are reported per fire and never surface
/// here.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the tools domain.
    #[error("Tool error: {0}")]
    Tool(#[from] crate::domains::tools::ToolError),

    /// Error originating from content loading.
    #[error("Content error: {0}")]
    Content(#[from] crate::domains::hardware::ContentError),

    /// Error originating from the input layer.
    #[error("Input error: {0}")]
    Input(#[from] super::input::InputError),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors from file operations or network communication.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
