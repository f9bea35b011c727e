//! Argument validation for the store's entry points.
//!
//! File paths are checked once, at construction, and are the only failure the
//! store reports to its caller. Dot paths are checked on every `get`/`set`;
//! callers turn a rejection into a logged no-op.

use std::path::Path;

use crate::error::JsonfigError;

/// Check that `path` names a config file the store can own: non-empty and absolute.
///
/// Does not touch the filesystem. A missing file is fine here; loading will
/// degrade it to an empty document.
pub fn validate_file_path(path: &Path) -> Result<(), JsonfigError> {
    if path.as_os_str().is_empty() {
        return Err(JsonfigError::InvalidPath {
            path: path.to_path_buf(),
            reason: "path must not be empty".into(),
        });
    }
    if !path.is_absolute() {
        return Err(JsonfigError::InvalidPath {
            path: path.to_path_buf(),
            reason: "path must be absolute".into(),
        });
    }
    Ok(())
}

/// Check a dot path before traversal.
///
/// Only the empty string is rejected. Empty segments (`"a..b"`) address the
/// empty-string key, which is a legal JSON object key.
pub fn validate_key(key: &str) -> Result<(), JsonfigError> {
    if key.is_empty() {
        return Err(JsonfigError::InvalidKey(key.into()));
    }
    Ok(())
}
