//! # jsonfig demo application
//!
//! A sample CLI tool that shows how to wire [jsonfig](https://docs.rs/jsonfig)
//! into an application. It exists to demonstrate and manually verify the
//! store; it is not a real app.
//!
//! ## Running
//!
//! ```sh
//! cargo run --example jsonfig_demo -- config set app.name Demo
//! cargo run --example jsonfig_demo -- greet
//! RUST_LOG=jsonfig=debug cargo run --example jsonfig_demo -- config list
//! ```
//!
//! ## Features demonstrated
//!
//! | Feature                 | How to exercise it                                               |
//! |-------------------------|------------------------------------------------------------------|
//! | Default for missing key | `greet` before anything is set                                   |
//! | Nested set              | `config set server.tls.enabled true`                             |
//! | Typed get               | `greet` reads `server.port` as `u16`                             |
//! | Malformed file          | Put `{ nope` in the file, run `config list` (logged, empty)      |
//! | Lock timeout            | `--lock-timeout-ms 100` while another process holds the lock     |
//! | Diagnostics             | `RUST_LOG=jsonfig=debug` shows load/save/lock events             |

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use jsonfig::{ConfigArgs, JsonStore};

/// jsonfig demo: a sample CLI app backed by a JSON config file.
#[derive(Parser, Debug)]
#[command(name = "jsonfig-demo")]
struct Cli {
    /// Config file to use. Relative paths resolve against the working directory.
    #[arg(long, global = true, default_value = "jsonfig-demo.json")]
    file: PathBuf,

    /// Give up on the file lock after this many milliseconds.
    #[arg(long, global = true)]
    lock_timeout_ms: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print a greeting built from `app.name` and `server.port`.
    Greet,
    /// Inspect or change the config file (list, get, set, unset, reload).
    Config(ConfigArgs),
}

fn open_store(cli: &Cli) -> JsonStore {
    // The store only accepts absolute paths.
    let path = if cli.file.is_absolute() {
        cli.file.clone()
    } else {
        let cwd = std::env::current_dir().unwrap_or_else(|e| {
            eprintln!("Cannot resolve working directory: {e}");
            std::process::exit(1);
        });
        cwd.join(&cli.file)
    };

    let mut builder = JsonStore::builder(path);
    if let Some(ms) = cli.lock_timeout_ms {
        builder = builder.lock_timeout(Duration::from_millis(ms));
    }
    builder.open().unwrap_or_else(|e| {
        eprintln!("Failed to open config:\n{e}");
        std::process::exit(1);
    })
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut store = open_store(&cli);

    match cli.command {
        Commands::Greet => {
            let name = store.get_or("app.name", "stranger");
            let port = store.get_as::<u16>("server.port").unwrap_or(8080);
            println!(
                "Hello, {}! Serving on port {port}.",
                name.as_str().unwrap_or("stranger")
            );
        }
        Commands::Config(args) => {
            let action = args.into_action();
            store.handle_and_print(&action);
        }
    }
}
