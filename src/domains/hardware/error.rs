//! Content-loading error types.

use thiserror::Error;

use crate::core::security::ContentPathError;

/// Errors that can occur while loading tool content.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The file could not be resolved inside the content directory.
    #[error(transparent)]
    Path(#[from] ContentPathError),

    /// The file is not in a supported format.
    #[error("Only wave files are supported ({0})")]
    UnsupportedFormat(String),

    /// The audio file could not be read.
    #[error("Cannot read audio '{name}': {reason}")]
    Audio { name: String, reason: String },
}

impl ContentError {
    /// Create a new "unsupported format" error.
    pub fn unsupported_format(name: impl Into<String>) -> Self {
        Self::UnsupportedFormat(name.into())
    }

    /// Create a new audio read error.
    pub fn audio(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Audio {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
