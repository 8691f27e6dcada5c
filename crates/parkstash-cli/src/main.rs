//! parkstash - favorites, preferences and a cached parks directory from the
//! command line.
//!
//! Storage lives in one JSON file per key under the configured storage
//! directory, the same layout a browser gives an origin's local storage.

mod commands;
mod config;

use std::io;

use anyhow::{Context, Result};
use parkstash_core::{FileLoader, FileMedium, HttpLoader, ParksLoader, Store};
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use config::Config;

/// Log file name prefix inside the log directory
const LOG_FILE_PREFIX: &str = "parkstash.log";

/// Initialize the tracing subscriber for logging.
/// Logs go to a daily rolling file when a log directory is configured,
/// otherwise to stderr. The returned guard must live until exit.
fn init_tracing(log_dir: Option<&std::path::Path>) -> Option<WorkerGuard> {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(writer).with_ansi(false))
                .with(filter)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(io::stderr))
                .with(filter)
                .init();
            None
        }
    }
}

fn build_loader(config: &Config) -> Result<Box<dyn ParksLoader>> {
    let source = config.data_source();
    if config.data_source_is_remote() {
        Ok(Box::new(
            HttpLoader::new(source).context("Failed to create HTTP client")?,
        ))
    } else {
        Ok(Box::new(FileLoader::new(source)))
    }
}

/// Handle `config` and `config set <field> <value>`
fn configure(mut config: Config, args: &[String]) -> Result<()> {
    match args {
        [] => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
        [set, field, value] if set == "set" => {
            match field.as_str() {
                "data_source" => config.data_source = Some(value.clone()),
                "origin" => config.origin = Some(value.clone()),
                "storage_dir" => config.storage_dir = Some(value.into()),
                "log_dir" => config.log_dir = Some(value.into()),
                other => anyhow::bail!("Unknown config field: {}", other),
            }
            config.save().context("Failed to save config")?;
            println!("Saved {}", field);
            Ok(())
        }
        _ => anyhow::bail!("{}", commands::USAGE),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() || args[0] == "--help" || args[0] == "-h" {
        println!("{}", commands::USAGE);
        return Ok(());
    }

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: failed to load config, using defaults: {}", e);
            Config::default()
        }
    };

    let _log_guard = init_tracing(config.log_dir.as_deref());
    info!("parkstash starting");

    if args[0] == "config" {
        return configure(config, &args[1..]);
    }

    let storage_dir = config.storage_dir()?;
    debug!(?storage_dir, origin = %config.origin(), "Storage directory configured");
    let medium = FileMedium::open(&storage_dir, config.origin())
        .with_context(|| format!("Failed to open storage at {}", storage_dir.display()))?;
    let store = Store::new(medium);
    let loader = build_loader(&config)?;

    let mut stdout = io::stdout().lock();
    commands::run(&store, &*loader, &args, &mut stdout).await
}
