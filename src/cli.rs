//! Clap adapter for jsonfig.
//!
//! This module is the **optional integration layer** between jsonfig's
//! framework-agnostic store and the [clap](https://docs.rs/clap) CLI parser.
//! It is compiled only when the `clap` Cargo feature is enabled (on by
//! default).
//!
//! Embed [`ConfigArgs`] in your own clap derive to get
//! `config list|get|set|unset|reload` subcommands. The only bridge to the core
//! is [`ConfigArgs::into_action()`], which produces a
//! [`ConfigAction`](crate::ConfigAction) for
//! [`JsonStore::handle()`](crate::JsonStore::handle).

use clap::{Args, Subcommand};

use crate::types::ConfigAction;

/// Clap-derived args for the `config` subcommand group.
///
/// ```ignore
/// #[derive(Subcommand)]
/// enum Commands {
///     Config(ConfigArgs),
/// }
/// ```
#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: Option<ConfigSubcommand>,
}

/// Available config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Show every value as a dotted key-value pair.
    List,
    /// Show the value stored at a dotted key.
    Get {
        /// Dotted key path (e.g. "server.port").
        key: String,
    },
    /// Store a value at a dotted key and write the file.
    ///
    /// The value is parsed as JSON when possible (`42`, `true`, `{"a":1}`),
    /// otherwise stored as a string.
    Set {
        /// Dotted key path (e.g. "server.port").
        key: String,
        /// Value to set.
        value: String,
    },
    /// Remove the value at a dotted key and write the file.
    Unset {
        /// Dotted key path (e.g. "server.port").
        key: String,
    },
    /// Re-read the config file from disk.
    Reload,
}

impl ConfigArgs {
    /// Convert clap-parsed args into a framework-agnostic `ConfigAction`.
    ///
    /// Bare `config` (no subcommand) and explicit `config list` both map to
    /// `ConfigAction::List`.
    pub fn into_action(self) -> ConfigAction {
        match self.action {
            None | Some(ConfigSubcommand::List) => ConfigAction::List,
            Some(ConfigSubcommand::Get { key }) => ConfigAction::Get { key },
            Some(ConfigSubcommand::Set { key, value }) => ConfigAction::Set { key, value },
            Some(ConfigSubcommand::Unset { key }) => ConfigAction::Unset { key },
            Some(ConfigSubcommand::Reload) => ConfigAction::Reload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    /// Wrapper so we can use `try_parse_from` on the subcommand.
    #[derive(Debug, Parser)]
    struct TestCli {
        #[command(flatten)]
        config: ConfigArgs,
    }

    fn parse(args: &[&str]) -> ConfigArgs {
        TestCli::try_parse_from(args).unwrap().config
    }

    #[test]
    fn parse_get() {
        let action = parse(&["test", "get", "app.name"]).into_action();
        assert_eq!(
            action,
            ConfigAction::Get {
                key: "app.name".into()
            }
        );
    }

    #[test]
    fn parse_set() {
        let action = parse(&["test", "set", "server.port", "3000"]).into_action();
        assert_eq!(
            action,
            ConfigAction::Set {
                key: "server.port".into(),
                value: "3000".into(),
            }
        );
    }

    #[test]
    fn parse_set_json_value() {
        let action = parse(&["test", "set", "limits", r#"{"max": 5}"#]).into_action();
        assert_eq!(
            action,
            ConfigAction::Set {
                key: "limits".into(),
                value: r#"{"max": 5}"#.into(),
            }
        );
    }

    #[test]
    fn parse_unset() {
        let action = parse(&["test", "unset", "app.mode"]).into_action();
        assert_eq!(
            action,
            ConfigAction::Unset {
                key: "app.mode".into()
            }
        );
    }

    #[test]
    fn parse_reload() {
        let action = parse(&["test", "reload"]).into_action();
        assert_eq!(action, ConfigAction::Reload);
    }

    #[test]
    fn parse_bare_config_is_list() {
        assert_eq!(parse(&["test"]).into_action(), ConfigAction::List);
    }

    #[test]
    fn parse_explicit_list() {
        assert_eq!(parse(&["test", "list"]).into_action(), ConfigAction::List);
    }

    #[test]
    fn set_requires_value() {
        assert!(TestCli::try_parse_from(["test", "set", "server.port"]).is_err());
    }

    #[test]
    fn invalid_subcommand_errors() {
        let result = TestCli::try_parse_from(["test", "nope"]);
        assert!(result.is_err());
    }
}
