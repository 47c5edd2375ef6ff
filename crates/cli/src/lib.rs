//! Command-line checker for event documents and aggregate manifests.
//!
//! Documents are plain JSON. Events are validated as-is; aggregate manifests
//! name their handler functions with a configurable prefix (see
//! [`manifest`]) and are validated as aggregate definitions.

pub mod args;
pub mod check;
pub mod config;
pub mod error;
pub mod manifest;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub use args::{Cli, Command};
pub use check::{Finding, Summary};
pub use config::{Config, LogFormat};
pub use error::{CliError, Result};

/// Installs the global tracing subscriber, writing to stderr.
pub fn init_tracing(config: &Config) -> Result<()> {
    let filter = EnvFilter::try_new(&config.log_level)
        .map_err(|e| CliError::Logging(format!("invalid filter {:?}: {e}", config.log_level)))?;
    let registry = tracing_subscriber::registry().with(filter);

    match config.log_format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init(),
    }
    .map_err(|e| CliError::Logging(e.to_string()))
}

/// Runs one command.
pub fn run(command: &Command, config: &Config) -> Result<Summary> {
    match command {
        Command::Event { files } => check::check_event_files(files, config),
        Command::Aggregate { name, file } => {
            check::check_aggregate_file(file, name.as_deref(), config)
        }
    }
}
