//! Dot-path access to a JSON config file, with write-through, lock-guarded
//! persistence.
//!
//! jsonfig loads one JSON object from disk, lets you read and write nested
//! values with dotted keys like `"server.port"`, and writes the whole file back
//! after every change.
//!
//! ```ignore
//! let mut store = JsonStore::open("/etc/myapp/config.json")?;
//!
//! let name = store.get_or("app.name", "myapp");
//! store.set("server.port", 8080);
//! ```
//!
//! # Lifecycle
//!
//! ```text
//! open ──► load ──► get / lookup / get_as / list     (in memory)
//!                   set / unset ──► save             (write-through)
//!                   reload ──► load                  (replace document)
//! ```
//!
//! [`JsonStore::open`] validates the path (non-empty, absolute) and loads the
//! file. That is the only call that returns an error. A missing, unreadable, or
//! malformed file opens as an empty document; the failure goes to the log.
//!
//! # Dot paths
//!
//! A key like `a.b.c` walks object keys `a`, then `b`, then `c`. Arrays are not
//! addressable: a path that runs into an array, a scalar, or `null` finds
//! nothing.
//!
//! - **Reads** return the stored value, including an explicitly stored `null`.
//!   The default passed to [`get_or`](JsonStore::get_or) is used only when the
//!   key is absent.
//! - **Writes** create missing intermediate objects and replace intermediates
//!   that are not objects. The leaf is overwritten whatever its previous type.
//!   A value that serializes to `null` is refused.
//!
//! # Persistence and locking
//!
//! Every successful [`set`](JsonStore::set) rewrites the file as pretty JSON
//! (2-space indent), keeping key order. The write happens under an exclusive
//! advisory lock on the file, released on every exit path. Configure
//! [`lock_timeout`](JsonStoreBuilder::lock_timeout) to bound the wait.
//!
//! The lock covers only the write. Two stores that both load, change
//! different keys, and save will lose the first change. Use one store per file,
//! or [`reload`](JsonStore::reload) before mutating, when that matters.
//!
//! # Error handling
//!
//! [`JsonfigError`] names every failure, but only
//! [`InvalidPath`](JsonfigError::InvalidPath) reaches callers. Everything else
//! is logged through [`tracing`](https://docs.rs/tracing) and degraded: empty
//! document, default value, or skipped save with the in-memory change kept.
//! Install a subscriber to see these events. The lower-level
//! [`load_document`] and [`save_document`] return the errors directly.
//!
//! # Clap adapter
//!
//! The `cli` module (behind the `clap` feature, on by default) provides
//! [`ConfigArgs`], a clap derive struct that gives your app
//! `config list|get|set|unset|reload`. It converts to a [`ConfigAction`] that
//! [`JsonStore::handle`] executes.

pub mod error;
pub mod types;

mod builder;
#[cfg(feature = "clap")]
mod cli;
mod file;
mod flatten;
mod ops;
mod persist;
mod store;
mod validate;

#[cfg(test)]
mod fixtures;

pub use builder::JsonStoreBuilder;
#[cfg(feature = "clap")]
pub use cli::{ConfigArgs, ConfigSubcommand};
pub use error::JsonfigError;
pub use file::load_document;
pub use ops::ConfigResult;
pub use persist::save_document;
pub use store::JsonStore;
pub use types::{ConfigAction, Document};
