//! Flatten a [`Document`] into dotted key/value pairs for `config list`.
//!
//! Objects are recursed into, building dotted key paths:
//! `{"database": {"url": "pg://"}}` → `[("database.url", "pg://")]`.
//! Arrays are not addressable by dot paths, so they are emitted whole.

use serde_json::Value;

use crate::types::Document;

/// Flatten a document into `(dotted_key, leaf_value)` pairs in document order.
///
/// An empty object has no leaves of its own and is emitted as `{}` so it
/// still shows up in listings.
pub fn flatten(doc: &Document) -> Vec<(String, Value)> {
    let mut out = Vec::new();
    flatten_into(doc, "", &mut out);
    out
}

fn flatten_into(map: &Document, prefix: &str, out: &mut Vec<(String, Value)>) {
    for (key, value) in map {
        let path = dotted(prefix, key);
        match value {
            Value::Object(inner) if !inner.is_empty() => flatten_into(inner, &path, out),
            leaf => out.push((path, leaf.clone())),
        }
    }
}

fn dotted(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}
