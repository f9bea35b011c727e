use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
#[cfg_attr(feature = "rich-errors", derive(miette::Diagnostic))]
pub enum JsonfigError {
    #[error("Invalid config file path '{}': {reason}", .path.display())]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(
            code(jsonfig::invalid_path),
            help("pass a non-empty absolute path to the JSON config file")
        )
    )]
    InvalidPath { path: PathBuf, reason: String },

    #[error("Failed to read {}: {source}", .path.display())]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(jsonfig::read)))]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {} as JSON: {source}", .path.display())]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(jsonfig::parse)))]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Expected a JSON object at the top of {}, found {found}", .path.display())]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(jsonfig::not_an_object)))]
    NotAnObject { path: PathBuf, found: &'static str },

    #[error("Invalid key '{0}': dot paths must be non-empty")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(jsonfig::invalid_key)))]
    InvalidKey(String),

    #[error("Invalid value for '{key}': {reason}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(jsonfig::invalid_value)))]
    InvalidValue { key: String, reason: String },

    #[error("Failed to lock {}: {source}", .path.display())]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(jsonfig::lock)))]
    LockError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Timed out after {timeout:?} waiting for the lock on {}", .path.display())]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(
            code(jsonfig::lock_timeout),
            help("another process is holding the lock; retry or raise the timeout")
        )
    )]
    LockTimeout { path: PathBuf, timeout: Duration },

    #[error("Failed to write {}: {source}", .path.display())]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(jsonfig::write)))]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to unlock {}: {source}", .path.display())]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(jsonfig::unlock)))]
    UnlockError {
        path: PathBuf,
        source: std::io::Error,
    },
}
