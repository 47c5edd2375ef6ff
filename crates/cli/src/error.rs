//! Checker error types.

use thiserror::Error;

/// Errors that stop the checker before a document can be validated.
///
/// Contract violations are not errors here; they are reported as findings.
#[derive(Debug, Error)]
pub enum CliError {
    /// A document could not be read.
    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A document is not valid JSON.
    #[error("{path} is not valid JSON: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// An event document is neither an object nor an array.
    #[error("{path}: expected a JSON object or an array of objects")]
    UnexpectedShape { path: String },

    /// Logging could not be initialized.
    #[error("cannot initialize logging: {0}")]
    Logging(String),
}

/// Result type for checker operations.
pub type Result<T> = std::result::Result<T, CliError>;
