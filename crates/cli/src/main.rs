//! Checker entry point.
//!
//! Exit codes: 0 when every document is valid, 1 when a document violates
//! its contract, 2 when a document cannot be read or parsed.

use std::process::ExitCode;

use clap::Parser;
use cli::{Cli, Config};

fn main() -> ExitCode {
    let args = Cli::parse();
    let config = Config::from_env().merge_cli(&args);

    if let Err(err) = cli::init_tracing(&config) {
        eprintln!("es-check: {err}");
        return ExitCode::from(2);
    }
    tracing::debug!(?config, "configuration loaded");

    match cli::run(&args.command, &config) {
        Ok(summary) => {
            for finding in &summary.findings {
                println!("{finding}");
            }
            if summary.all_valid() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Err(err) => {
            tracing::error!(error = %err, "check aborted");
            eprintln!("es-check: {err}");
            ExitCode::from(2)
        }
    }
}
