use std::path::PathBuf;
use std::time::Duration;

use crate::error::JsonfigError;
use crate::store::JsonStore;
use crate::validate;

/// Builder for opening a [`JsonStore`] with non-default options.
///
/// ```ignore
/// let store = JsonStore::builder("/etc/myapp/config.json")
///     .lock_timeout(Duration::from_secs(2))
///     .open()?;
/// ```
#[derive(Debug, Clone)]
pub struct JsonStoreBuilder {
    path: PathBuf,
    lock_timeout: Option<Duration>,
}

impl JsonStoreBuilder {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock_timeout: None,
        }
    }

    /// Bound how long a save waits for the file lock (default: wait forever).
    ///
    /// When the timeout elapses the save is skipped and logged; the in-memory
    /// change is kept. A timeout too large to form a deadline (e.g.
    /// `Duration::MAX`) behaves like the default.
    pub fn lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = Some(timeout);
        self
    }

    /// Validate the path and load the file.
    ///
    /// Only an empty or relative path is an error. A missing, unreadable, or
    /// malformed file opens as an empty document and is logged.
    pub fn open(self) -> Result<JsonStore, JsonfigError> {
        validate::validate_file_path(&self.path)?;
        Ok(JsonStore::load_new(self.path, self.lock_timeout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn lock_timeout_defaults_to_none() {
        let builder = JsonStore::builder("/tmp/app.json");
        assert_eq!(builder.lock_timeout, None);
    }

    #[test]
    fn lock_timeout_can_be_set() {
        let builder = JsonStore::builder("/tmp/app.json").lock_timeout(Duration::from_secs(2));
        assert_eq!(builder.lock_timeout, Some(Duration::from_secs(2)));
    }

    #[test]
    fn open_carries_options_to_store() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::builder(dir.path().join("config.json"))
            .lock_timeout(Duration::from_millis(500))
            .open()
            .unwrap();
        assert_eq!(store.lock_timeout(), Some(Duration::from_millis(500)));
        assert!(store.document().is_empty());
    }

    #[test]
    fn open_rejects_relative_path() {
        let result = JsonStore::builder("relative/config.json").open();
        assert!(matches!(result, Err(JsonfigError::InvalidPath { .. })));
    }
}
