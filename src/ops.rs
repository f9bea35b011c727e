//! Dot-path operations on a [`Document`], plus the `ConfigResult` enum that
//! [`JsonStore::handle`](crate::JsonStore::handle) returns for display.
//!
//! Everything here is pure: no I/O, no logging. The store wraps these with
//! validation, diagnostics, and write-through persistence.

use std::fmt;
use std::path::PathBuf;

use serde_json::{Map, Value};

use crate::types::Document;

/// Result of a config operation. Returned to the caller for display.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigResult {
    /// A key's value, or `None` when nothing is stored at that path.
    KeyValue { key: String, value: Option<Value> },
    /// Confirmation that a value was set (and a save attempted).
    ValueSet { key: String, value: Value },
    /// The key or value was refused; nothing changed.
    ValueRejected { key: String },
    /// Outcome of an unset; `removed` is false when the key was not present.
    ValueUnset { key: String, removed: bool },
    /// All leaf values as flattened dotted key/value pairs.
    Listing { entries: Vec<(String, Value)> },
    /// Confirmation that the document was re-read from disk.
    Reloaded { path: PathBuf },
}

impl fmt::Display for ConfigResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigResult::KeyValue { key, value } => match value {
                Some(v) => write!(f, "{key} = {}", format_value(v)),
                None => write!(f, "{key} = <not set>"),
            },
            ConfigResult::ValueSet { key, value } => {
                write!(f, "Set {key} = {}", format_value(value))
            }
            ConfigResult::ValueRejected { key } => {
                write!(f, "Rejected value for {key}, nothing changed")
            }
            ConfigResult::ValueUnset { key, removed } => {
                if *removed {
                    write!(f, "Unset {key}")
                } else {
                    write!(f, "{key} was not set")
                }
            }
            ConfigResult::Listing { entries } => {
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{key} = {}", format_value(value))?;
                }
                Ok(())
            }
            ConfigResult::Reloaded { path } => write!(f, "Reloaded {}", path.display()),
        }
    }
}

/// Navigate a document by dotted key path (e.g. `"database.url"`).
///
/// Returns `None` as soon as an intermediate value is missing or is not an
/// object. A stored `null` at the leaf is returned as `Some(&Value::Null)`.
pub fn lookup<'a>(doc: &'a Document, dotted_key: &str) -> Option<&'a Value> {
    let (path, leaf) = match dotted_key.rsplit_once('.') {
        Some((p, l)) => (Some(p), l),
        None => (None, dotted_key),
    };

    let map = match path {
        Some(path) => {
            let mut current = doc;
            for segment in path.split('.') {
                current = current.get(segment)?.as_object()?;
            }
            current
        }
        None => doc,
    };

    map.get(leaf)
}

/// Set `value` at a dotted key path, creating intermediate objects as needed.
///
/// Any intermediate that is missing or holds a non-object value (scalar,
/// array, or null) is replaced by an empty object. The leaf is overwritten
/// regardless of its previous type.
pub fn insert(doc: &mut Document, dotted_key: &str, value: Value) {
    let (path, leaf) = match dotted_key.rsplit_once('.') {
        Some((p, l)) => (Some(p), l),
        None => (None, dotted_key),
    };

    let mut current = doc;
    if let Some(path) = path {
        for segment in path.split('.') {
            let slot = current
                .entry(segment)
                .or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            let Value::Object(map) = slot else {
                unreachable!("intermediate slot was just made an object");
            };
            current = map;
        }
    }

    current.insert(leaf.to_string(), value);
}

/// Remove the value at a dotted key path, returning it if it was present.
///
/// Never creates or replaces intermediates. Sibling order is preserved.
pub fn remove(doc: &mut Document, dotted_key: &str) -> Option<Value> {
    let (path, leaf) = match dotted_key.rsplit_once('.') {
        Some((p, l)) => (Some(p), l),
        None => (None, dotted_key),
    };

    let mut current = doc;
    if let Some(path) = path {
        for segment in path.split('.') {
            current = current.get_mut(segment)?.as_object_mut()?;
        }
    }

    current.shift_remove(leaf)
}

/// Parse a raw CLI string into a JSON value.
///
/// Anything that is valid JSON (`42`, `true`, `{"a":1}`, `"quoted"`) keeps its
/// JSON type; everything else becomes a plain string.
pub fn parse_raw_value(s: &str) -> Value {
    serde_json::from_str(s).unwrap_or_else(|_| Value::String(s.to_string()))
}

/// Format a JSON value for display. Strings are shown without quotes.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
