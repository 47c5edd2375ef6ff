//! Loading JSON documents into structural values.
//!
//! JSON has no functions, so aggregate manifests name their handlers
//! instead: a string such as `"fn:applyBookEvent"` stands for the function
//! the host registers under that name.

use std::path::Path;

use common::{Callable, Object, Value};

use crate::error::{CliError, Result};

/// Reads a file and parses it as JSON.
pub fn read_json(path: &Path) -> Result<serde_json::Value> {
    let label = path.display().to_string();
    let text = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: label.clone(),
        source,
    })?;
    parse_json(&label, &text)
}

pub fn parse_json(label: &str, text: &str) -> Result<serde_json::Value> {
    serde_json::from_str(text).map_err(|source| CliError::Parse {
        path: label.to_string(),
        source,
    })
}

/// Splits an event document into events.
///
/// A document holds a single event object or an array of them. Array
/// entries are returned as-is, so non-object entries fail validation
/// rather than loading.
pub fn events(label: &str, document: serde_json::Value) -> Result<Vec<Value>> {
    match document {
        serde_json::Value::Array(items) => Ok(items.into_iter().map(Value::from).collect()),
        object @ serde_json::Value::Object(_) => Ok(vec![Value::from(object)]),
        _ => Err(CliError::UnexpectedShape {
            path: label.to_string(),
        }),
    }
}

/// Converts a manifest, turning prefixed strings into named functions.
///
/// Only handler positions are resolved: the members of `projection` and
/// the members of each entry under `commands`. Everything else, such as
/// `idField`, stays as written.
pub fn aggregate(document: serde_json::Value, fn_prefix: &str) -> Value {
    let mut aggregate = Value::from(document);
    let Value::Object(root) = &mut aggregate else {
        return aggregate;
    };

    if let Some(Value::Object(projection)) = root.get_mut("projection") {
        resolve_members(projection, fn_prefix);
    }
    if let Some(Value::Object(commands)) = root.get_mut("commands") {
        for command in commands.values_mut() {
            if let Value::Object(command) = command {
                resolve_members(command, fn_prefix);
            }
        }
    }
    aggregate
}

fn resolve_members(object: &mut Object, fn_prefix: &str) {
    for member in object.values_mut() {
        let callable = match member {
            Value::String(s) => s
                .strip_prefix(fn_prefix)
                .filter(|name| !name.is_empty())
                .map(Callable::noop),
            _ => None,
        };
        if let Some(callable) = callable {
            *member = Value::Function(callable);
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn single_event_document() {
        let events = events("one.json", json!({"type": "CREATE"})).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].get("type"), Some(&Value::from("CREATE")));
    }

    #[test]
    fn array_event_document_keeps_entries() {
        let events = events("many.json", json!([{"type": "A"}, 5])).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1], Value::from(5));
    }

    #[test]
    fn scalar_event_document_is_rejected() {
        let err = events("bad.json", json!("CREATE")).unwrap_err();
        assert!(matches!(err, CliError::UnexpectedShape { .. }));
    }

    #[test]
    fn prefixed_handlers_become_functions() {
        let manifest = aggregate(
            json!({
                "idField": "bookId",
                "projection": {"applyEvent": "fn:applyBookEvent", "note": "plain"},
                "commands": {"create": {"createEvent": "fn:createBook", "validateParams": "fn:"}},
            }),
            "fn:",
        );

        let apply = manifest
            .get("projection")
            .and_then(|p| p.get("applyEvent"))
            .and_then(Value::as_callable)
            .unwrap();
        assert_eq!(apply.name(), "applyBookEvent");
        assert_eq!(
            manifest.get("projection").and_then(|p| p.get("note")),
            Some(&Value::from("plain"))
        );

        let create = manifest.get("commands").and_then(|c| c.get("create")).unwrap();
        assert!(create.get("createEvent").is_some_and(Value::is_function));
        assert_eq!(create.get("validateParams"), Some(&Value::from("fn:")));
    }

    #[test]
    fn data_keys_keep_prefixed_strings() {
        let manifest = aggregate(
            json!({
                "idField": "fn:bookId",
                "meta": {"owner": "fn:library"},
                "commands": [{"createEvent": "fn:createBook"}],
            }),
            "fn:",
        );

        assert_eq!(manifest.get("idField"), Some(&Value::from("fn:bookId")));
        assert_eq!(
            manifest.get("meta").and_then(|m| m.get("owner")),
            Some(&Value::from("fn:library"))
        );
        let Some(Value::Array(commands)) = manifest.get("commands") else {
            panic!("expected commands array");
        };
        assert_eq!(commands[0].get("createEvent"), Some(&Value::from("fn:createBook")));
    }

    #[test]
    fn invalid_json_names_the_document() {
        let err = parse_json("broken.json", "{").unwrap_err();
        assert!(err.to_string().starts_with("broken.json is not valid JSON"));
    }
}
