//! The config store: one JSON file, one in-memory document.
//!
//! [`JsonStore`] is the boundary where `Result`s stop. Construction is the only
//! fallible call. Every other failure is logged through `tracing` and turned
//! into a well-defined degraded result:
//!
//! | Failure                        | Outcome                                   |
//! |--------------------------------|-------------------------------------------|
//! | file unreadable / not JSON     | document becomes the empty object         |
//! | empty dot path                 | `get*` returns the default, `set` no-op   |
//! | value serializes to `null`     | `set` is a no-op                          |
//! | lock, write, or unlock failure | in-memory change kept, file left as is    |
//!
//! Callers that need to detect failures inspect [`JsonStore::document`] or the
//! log output.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::builder::JsonStoreBuilder;
use crate::error::JsonfigError;
use crate::file;
use crate::flatten;
use crate::ops::{self, ConfigResult};
use crate::persist;
use crate::types::{ConfigAction, Document};
use crate::validate;

/// A JSON config file loaded into memory, with dot-path access and
/// write-through persistence.
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    document: Document,
    lock_timeout: Option<Duration>,
}

impl JsonStore {
    /// Open the config file at `path`, which must be non-empty and absolute.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, JsonfigError> {
        Self::builder(path).open()
    }

    /// Create a builder for opening a store with non-default options.
    ///
    /// ```ignore
    /// let store = JsonStore::builder("/etc/app/config.json")
    ///     .lock_timeout(Duration::from_secs(2))
    ///     .open()?;
    /// ```
    pub fn builder(path: impl Into<PathBuf>) -> JsonStoreBuilder {
        JsonStoreBuilder::new(path.into())
    }

    pub(crate) fn load_new(path: PathBuf, lock_timeout: Option<Duration>) -> Self {
        let document = load_or_empty(&path);
        Self {
            path,
            document,
            lock_timeout,
        }
    }

    /// The absolute path of the backing file, fixed at construction.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// How long a save waits for the file lock; `None` waits indefinitely.
    pub fn lock_timeout(&self) -> Option<Duration> {
        self.lock_timeout
    }

    /// The current in-memory document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Borrow the value at a dot path, if any.
    ///
    /// A stored `null` is found: it returns `Some(&Value::Null)`.
    pub fn lookup(&self, key: &str) -> Option<&Value> {
        if let Err(e) = validate::validate_key(key) {
            warn!(error = %e, "config lookup skipped");
            return None;
        }
        ops::lookup(&self.document, key)
    }

    /// The value at a dot path, or `null` when nothing is stored there.
    pub fn get(&self, key: &str) -> Value {
        self.get_or(key, Value::Null)
    }

    /// The value at a dot path, or `default` when nothing is stored there.
    ///
    /// `default` is only used for absent keys. An explicitly stored `null` is
    /// returned as `null`.
    pub fn get_or(&self, key: &str, default: impl Into<Value>) -> Value {
        match self.lookup(key) {
            Some(value) => value.clone(),
            None => default.into(),
        }
    }

    /// Deserialize the value at a dot path into `T`.
    ///
    /// Returns `None` for absent keys and for values that don't fit `T`; the
    /// latter is logged.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.lookup(key)?;
        match serde_json::from_value(value.clone()) {
            Ok(v) => Some(v),
            Err(e) => {
                warn!(key, error = %e, "config value has an unexpected type");
                None
            }
        }
    }

    /// Set the value at a dot path and save the whole document.
    ///
    /// Missing or non-object intermediates are replaced with empty objects.
    /// The save runs even when the value is unchanged. A failed save is logged
    /// and the in-memory change is kept.
    pub fn set<V: Serialize>(&mut self, key: &str, value: V) {
        self.set_inner(key, value);
    }

    /// Returns whether the value was accepted into the document.
    fn set_inner<V: Serialize>(&mut self, key: &str, value: V) -> bool {
        if let Err(e) = validate::validate_key(key) {
            warn!(error = %e, "config set skipped");
            return false;
        }

        let value = match to_storable(key, value) {
            Ok(v) => v,
            Err(e) => {
                warn!(key, error = %e, "config set skipped");
                return false;
            }
        };

        ops::insert(&mut self.document, key, value);
        debug!(key, path = %self.path.display(), "config value set");
        self.save();
        true
    }

    /// Remove the value at a dot path. Saves only if something was removed.
    pub fn unset(&mut self, key: &str) -> bool {
        if let Err(e) = validate::validate_key(key) {
            warn!(error = %e, "config unset skipped");
            return false;
        }

        match ops::remove(&mut self.document, key) {
            Some(_) => {
                debug!(key, path = %self.path.display(), "config value removed");
                self.save();
                true
            }
            None => false,
        }
    }

    /// All leaf values as dotted key/value pairs, in document order.
    pub fn list(&self) -> Vec<(String, Value)> {
        flatten::flatten(&self.document)
    }

    /// Write the in-memory document to disk under the file lock.
    ///
    /// Failures are logged, never returned.
    pub fn save(&self) {
        if let Err(e) = persist::save_document(&self.path, &self.document, self.lock_timeout) {
            error!(path = %self.path.display(), error = %e, "failed to save config file");
        }
    }

    /// Re-read the file, replacing the in-memory document wholesale.
    ///
    /// Unsaved changes are discarded. A failed read leaves an empty document.
    pub fn reload(&mut self) {
        self.document = load_or_empty(&self.path);
    }

    /// Handle a `ConfigAction` and print the result to stdout.
    pub fn handle_and_print(&mut self, action: &ConfigAction) {
        let result = self.handle(action);
        println!("{result}");
    }

    /// Handle a `ConfigAction` (list / get / set / unset / reload).
    pub fn handle(&mut self, action: &ConfigAction) -> ConfigResult {
        match action {
            ConfigAction::List => ConfigResult::Listing {
                entries: self.list(),
            },
            ConfigAction::Get { key } => ConfigResult::KeyValue {
                key: key.clone(),
                value: self.lookup(key).cloned(),
            },
            ConfigAction::Set { key, value } => {
                let parsed = ops::parse_raw_value(value);
                if self.set_inner(key, &parsed) {
                    ConfigResult::ValueSet {
                        key: key.clone(),
                        value: parsed,
                    }
                } else {
                    ConfigResult::ValueRejected { key: key.clone() }
                }
            }
            ConfigAction::Unset { key } => ConfigResult::ValueUnset {
                key: key.clone(),
                removed: self.unset(key),
            },
            ConfigAction::Reload => {
                self.reload();
                ConfigResult::Reloaded {
                    path: self.path.clone(),
                }
            }
        }
    }
}

/// Load the file, degrading every failure to an empty document.
fn load_or_empty(path: &Path) -> Document {
    match file::load_document(path) {
        Ok(doc) => {
            debug!(path = %path.display(), keys = doc.len(), "config file loaded");
            doc
        }
        Err(e @ JsonfigError::ReadError { .. }) => {
            warn!(path = %path.display(), error = %e, "failed to read config file, using empty config");
            Document::new()
        }
        Err(e) => {
            error!(path = %path.display(), error = %e, "failed to parse config file, using empty config");
            Document::new()
        }
    }
}

/// Convert a value for storage. `null` stands in for an absent value and is refused.
fn to_storable<V: Serialize>(key: &str, value: V) -> Result<Value, JsonfigError> {
    let value = serde_json::to_value(value).map_err(|e| JsonfigError::InvalidValue {
        key: key.into(),
        reason: e.to_string(),
    })?;

    if value.is_null() {
        return Err(JsonfigError::InvalidValue {
            key: key.into(),
            reason: "value is null or absent".into(),
        });
    }
    Ok(value)
}
