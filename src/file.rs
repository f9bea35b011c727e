//! Loading the config file from disk.
//!
//! [`load_document`] is the `Result`-returning half of the store's load step.
//! It distinguishes three failures:
//!
//! - the file could not be read ([`ReadError`](JsonfigError::ReadError)),
//! - the text is not JSON ([`ParseError`](JsonfigError::ParseError)),
//! - the JSON is valid but its top level is not an object
//!   ([`NotAnObject`](JsonfigError::NotAnObject)).
//!
//! The store maps all three to an empty document plus a log event. Loading
//! never takes the file lock; see [`persist`](crate::persist) for why that
//! leaves a lost-update window.

use std::path::Path;

use serde_json::Value;

use crate::error::JsonfigError;
use crate::types::Document;

/// Read and parse the JSON object stored at `path`.
///
/// The file is read as bytes, so content that is not valid UTF-8 is a
/// [`ParseError`](JsonfigError::ParseError), not a read failure.
pub fn load_document(path: &Path) -> Result<Document, JsonfigError> {
    let content = std::fs::read(path).map_err(|e| JsonfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_document(&content, path)
}

/// Parse file contents into a document. `path` is only used for error messages.
pub fn parse_document(content: &[u8], path: &Path) -> Result<Document, JsonfigError> {
    let value: Value = serde_json::from_slice(content).map_err(|e| JsonfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(JsonfigError::NotAnObject {
            path: path.to_path_buf(),
            found: kind_name(&other),
        }),
    }
}

/// Human-readable name of a JSON value's variant.
pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
