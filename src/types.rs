use serde_json::{Map, Value};

/// The in-memory config tree: a JSON object, keys kept in file order.
pub type Document = Map<String, Value>;

/// A config operation, independent of any CLI framework.
/// The CLI layer converts parsed clap args into this.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigAction {
    List,
    Get { key: String },
    Set { key: String, value: String },
    Unset { key: String },
    Reload,
}
