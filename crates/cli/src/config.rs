//! Checker configuration loaded from environment variables.

use schema::ValidateOptions;

use crate::args::Cli;

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Checker configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `ES_CHECK_LOG`, then `RUST_LOG`: tracing filter directive (default: `"warn"`)
/// - `ES_CHECK_LOG_FORMAT`: `text` or `json` (default: `text`)
/// - `ES_CHECK_ABORT_EARLY`: report only the first violation per document
///   (default: `false`)
/// - `ES_CHECK_FN_PREFIX`: marks function references in manifests
///   (default: `"fn:"`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub log_level: String,
    pub log_format: LogFormat,
    pub abort_early: bool,
    pub fn_prefix: String,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            log_level: lookup("ES_CHECK_LOG")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or(defaults.log_level),
            log_format: match lookup("ES_CHECK_LOG_FORMAT").as_deref() {
                Some("json") => LogFormat::Json,
                _ => LogFormat::Text,
            },
            abort_early: lookup("ES_CHECK_ABORT_EARLY")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.abort_early),
            fn_prefix: lookup("ES_CHECK_FN_PREFIX")
                .filter(|p| !p.is_empty())
                .unwrap_or(defaults.fn_prefix),
        }
    }

    /// Applies command-line overrides.
    pub fn merge_cli(mut self, cli: &Cli) -> Self {
        if let Some(log) = &cli.log {
            self.log_level = log.clone();
        }
        self.abort_early |= cli.abort_early;
        self
    }

    pub fn validate_options(&self) -> ValidateOptions {
        ValidateOptions {
            abort_early: self.abort_early,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            log_format: LogFormat::Text,
            abort_early: false,
            fn_prefix: "fn:".to_string(),
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use clap::Parser;

    use super::*;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_default_values() {
        let config = Config::from_lookup(lookup_from(&[]));
        assert_eq!(config, Config::default());
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.fn_prefix, "fn:");
        assert!(!config.abort_early);
    }

    #[test]
    fn test_specific_log_variable_wins() {
        let config = Config::from_lookup(lookup_from(&[
            ("RUST_LOG", "info"),
            ("ES_CHECK_LOG", "schema=debug"),
        ]));
        assert_eq!(config.log_level, "schema=debug");

        let config = Config::from_lookup(lookup_from(&[("RUST_LOG", "info")]));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_flags_and_format() {
        let config = Config::from_lookup(lookup_from(&[
            ("ES_CHECK_ABORT_EARLY", "TRUE"),
            ("ES_CHECK_LOG_FORMAT", "json"),
            ("ES_CHECK_FN_PREFIX", "handler:"),
        ]));
        assert!(config.abort_early);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.fn_prefix, "handler:");
        assert!(config.validate_options().abort_early);
    }

    #[test]
    fn test_empty_prefix_falls_back() {
        let config = Config::from_lookup(lookup_from(&[("ES_CHECK_FN_PREFIX", "")]));
        assert_eq!(config.fn_prefix, "fn:");
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from(["es-check", "--abort-early", "--log", "debug", "event", "a.json"]);
        let config = Config::default().merge_cli(&cli);
        assert!(config.abort_early);
        assert_eq!(config.log_level, "debug");
    }
}
