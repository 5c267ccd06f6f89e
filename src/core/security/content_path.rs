use std::io;
use std::path::{Path, PathBuf};

/// Errors that can occur while resolving a content file
#[derive(Debug, thiserror::Error)]
pub enum ContentPathError {
    #[error("Content '{path}' is outside the content directory '{root}'")]
    OutsideRootDirectory { path: PathBuf, root: PathBuf },

    #[error("Content file does not exist: '{path}'")]
    PathNotFound { path: PathBuf },

    #[error("Content '{path}' is not a file")]
    NotAFile { path: PathBuf },

    #[error("IO error for path '{path}': {error}")]
    IoError { path: PathBuf, error: io::Error },
}

/// Resolves a content file name against the content directory.
///
/// This function performs the following checks:
/// 1. Joins `name` onto `root` and canonicalizes both, resolving `.`, `..`
///    and symlinks
/// 2. Ensures the canonical file lies within the canonical root
/// 3. Ensures the result is a regular file
///
/// # Arguments
///
/// * `root` - The content directory
/// * `name` - File name as written in the configuration, relative to `root`
///
/// # Returns
///
/// * `Ok(PathBuf)` - The canonicalized, validated path
/// * `Err(ContentPathError)` - If validation fails
///
/// # Examples
///
/// ```rust,ignore
/// let sound = resolve_content(&config.content.root, "sprayer.wav")?;
/// ```
pub fn resolve_content(root: &Path, name: &str) -> Result<PathBuf, ContentPathError> {
    let canonical_root = root.canonicalize().map_err(|e| ContentPathError::IoError {
        path: root.to_path_buf(),
        error: e,
    })?;

    let candidate = root.join(name);
    let canonical_path = candidate.canonicalize().map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            ContentPathError::PathNotFound {
                path: candidate.clone(),
            }
        } else {
            ContentPathError::IoError {
                path: candidate.clone(),
                error: e,
            }
        }
    })?;

    // Symlinks were followed by canonicalize, so an escaping link fails here too
    if !is_within_root(&canonical_path, &canonical_root) {
        return Err(ContentPathError::OutsideRootDirectory {
            path: canonical_path,
            root: canonical_root,
        });
    }

    if !canonical_path.is_file() {
        return Err(ContentPathError::NotAFile {
            path: canonical_path,
        });
    }

    Ok(canonical_path)
}

/// Checks if a path is within (or equal to) a root directory
fn is_within_root(path: &Path, root: &Path) -> bool {
    path.starts_with(root)
}
