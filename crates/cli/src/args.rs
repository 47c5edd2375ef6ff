//! Command-line arguments.
//!
//! Commands:
//! - es-check event <FILE>...
//! - es-check aggregate [--name <NAME>] <FILE>

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Checks event documents and aggregate manifests against their contracts
#[derive(Parser, Debug)]
#[command(name = "es-check")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Report only the first violation in each document
    #[arg(long, global = true)]
    pub abort_early: bool,

    /// Tracing filter directive, overrides ES_CHECK_LOG
    #[arg(long, global = true)]
    pub log: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate event documents (a JSON object or an array of objects per file)
    Event {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Validate an aggregate manifest
    Aggregate {
        /// Aggregate name used in messages (default: the file stem)
        #[arg(long)]
        name: Option<String>,

        file: PathBuf,
    },
}
