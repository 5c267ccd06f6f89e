// Security module for content path validation
//
// This module ensures that every content file named in the configuration
// resolves inside the content directory, preventing path traversal out of it.

pub mod content_path;

pub use content_path::{ContentPathError, resolve_content};
