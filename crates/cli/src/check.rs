//! Running contract checks over documents.

use std::fmt;
use std::path::Path;

use common::Value;
use errors::EventSourcingError;

use crate::config::Config;
use crate::error::Result;
use crate::manifest;

/// The outcome of checking one document.
#[derive(Debug, Clone, PartialEq)]
pub struct Finding {
    /// Where the document came from, e.g. `events.json[2]`.
    pub source: String,
    pub error: Option<EventSourcingError>,
}

impl Finding {
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error {
            None => write!(f, "{}: ok", self.source),
            Some(err) => write!(f, "{}: {}: {}", self.source, err.kind(), err),
        }
    }
}

/// All findings of a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub findings: Vec<Finding>,
}

impl Summary {
    pub fn all_valid(&self) -> bool {
        self.findings.iter().all(Finding::is_valid)
    }

    pub fn failures(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| !f.is_valid())
    }

    fn record(&mut self, source: String, result: errors::Result<()>) {
        let error = result.err();
        if let Some(err) = &error {
            tracing::warn!(%source, kind = %err.kind(), error = %err, "contract violated");
        }
        self.findings.push(Finding { source, error });
    }
}

/// Validates the events of one parsed document.
///
/// Array documents are labelled per entry.
pub fn check_event_document(
    label: &str,
    document: serde_json::Value,
    config: &Config,
) -> Result<Summary> {
    let indexed = document.is_array();
    let events = manifest::events(label, document)?;
    let options = config.validate_options();

    let mut summary = Summary::default();
    for (index, event) in events.iter().enumerate() {
        let source = if indexed {
            format!("{label}[{index}]")
        } else {
            label.to_string()
        };
        summary.record(source, schema::validate_event_with(event, options));
    }
    Ok(summary)
}

/// Validates every event in the given files.
#[tracing::instrument(skip(paths, config), fields(files = paths.len()))]
pub fn check_event_files(paths: &[impl AsRef<Path>], config: &Config) -> Result<Summary> {
    let mut summary = Summary::default();
    for path in paths {
        let path = path.as_ref();
        let document = manifest::read_json(path)?;
        let found = check_event_document(&path.display().to_string(), document, config)?;
        summary.findings.extend(found.findings);
    }
    Ok(summary)
}

/// Validates one parsed aggregate manifest.
pub fn check_aggregate_document(
    label: &str,
    aggregate_name: &str,
    document: serde_json::Value,
    config: &Config,
) -> Summary {
    let aggregate: Value = manifest::aggregate(document, &config.fn_prefix);
    let mut summary = Summary::default();
    summary.record(
        label.to_string(),
        schema::validate_aggregate_with(&aggregate, aggregate_name, config.validate_options()),
    );
    summary
}

/// Validates an aggregate manifest file.
///
/// Without an explicit name the aggregate is named after the file stem.
#[tracing::instrument(skip(config))]
pub fn check_aggregate_file(
    path: &Path,
    aggregate_name: Option<&str>,
    config: &Config,
) -> Result<Summary> {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let aggregate_name = aggregate_name.unwrap_or(&stem);
    let document = manifest::read_json(path)?;
    Ok(check_aggregate_document(
        &path.display().to_string(),
        aggregate_name,
        document,
        config,
    ))
}

#[cfg(test)]
mod tests {
    use errors::ErrorKind;
    use serde_json::json;

    use super::*;

    fn event(sequence_number: i64) -> serde_json::Value {
        json!({
            "aggregateName": "book",
            "aggregateId": "AjLS_AMKa",
            "eventId": sequence_number,
            "type": "BOOK_NAME_SET",
            "payload": {"name": "Dune"},
            "metadata": {},
            "sequenceNumber": sequence_number,
        })
    }

    #[test]
    fn single_event_is_labelled_by_document() {
        let summary =
            check_event_document("one.json", event(1), &Config::default()).unwrap();
        assert!(summary.all_valid());
        assert_eq!(summary.findings[0].to_string(), "one.json: ok");
    }

    #[test]
    fn array_entries_are_labelled_by_index() {
        let summary = check_event_document(
            "many.json",
            json!([event(1), event(0)]),
            &Config::default(),
        )
        .unwrap();

        assert!(!summary.all_valid());
        let failures: Vec<_> = summary.failures().collect();
        assert_eq!(failures.len(), 1);
        assert_eq!(
            failures[0].to_string(),
            "many.json[1]: InvalidEventError: \"sequenceNumber\" must be greater than 0"
        );
    }

    #[test]
    fn abort_early_is_taken_from_config() {
        let config = Config {
            abort_early: true,
            ..Config::default()
        };
        let summary = check_event_document("empty.json", json!({}), &config).unwrap();
        let error = summary.findings[0].error.as_ref().unwrap();
        assert_eq!(error.to_string(), "\"aggregateName\" is required");
    }

    #[test]
    fn aggregate_manifest_with_named_functions() {
        let manifest = json!({
            "idField": "bookId",
            "projection": {
                "initialState": "fn:initialBook",
                "applyEvent": "fn:applyBookEvent",
                "validateState": "fn:validateBook",
            },
            "commands": {
                "create": {
                    "validateParams": "fn:validateCreate",
                    "createEvent": "fn:createBook",
                    "isCreateCommand": true,
                },
            },
        });

        let summary =
            check_aggregate_document("book.json", "book", manifest, &Config::default());
        assert!(summary.all_valid());
    }

    #[test]
    fn aggregate_manifest_with_plain_string_handler() {
        let manifest = json!({
            "idField": "bookId",
            "projection": {
                "initialState": "fn:initialBook",
                "applyEvent": "applyBookEvent",
                "validateState": "fn:validateBook",
            },
            "commands": {},
        });

        let summary =
            check_aggregate_document("book.json", "book", manifest, &Config::default());
        let error = summary.findings[0].error.as_ref().unwrap();
        assert_eq!(error.kind(), ErrorKind::InvalidProjection);
        assert_eq!(
            error.to_string(),
            "aggregate \"book\" has an invalid projection: \"applyEvent\" must be of type function"
        );
    }
}
