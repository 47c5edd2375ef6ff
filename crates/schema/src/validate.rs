//! Validation entry points.
//!
//! Events and aggregate definitions are rejected with an
//! [`EventSourcingError`]; repositories, notification handlers and
//! authorizers are answered with a [`ValidationResult`] the caller inspects.
//! Hosts rely on both conventions.

use common::Value;
use errors::EventSourcingError;

use crate::contracts::{
    aggregate_schema, authorizer_schema, command_schema, event_repository_schema, event_schema,
    notification_handler_schema, projection_schema, snapshot_repository_schema,
};
use crate::object::{ObjectSchema, ValidateOptions};
use crate::outcome::ValidationResult;

static NULL: Value = Value::Null;

/// Runs a schema and records the outcome.
fn run(
    schema_name: &'static str,
    schema: &ObjectSchema,
    value: &Value,
    options: ValidateOptions,
) -> ValidationResult {
    metrics::counter!("schema_validations_total", "schema" => schema_name).increment(1);
    let result = schema.validate_with(value, options);
    if let Some(error) = &result.error {
        metrics::counter!("schema_validation_failures_total", "schema" => schema_name)
            .increment(1);
        tracing::debug!(
            schema = schema_name,
            violations = error.details().len(),
            %error,
            "value rejected"
        );
    }
    result
}

/// Validates an incoming event.
///
/// Fails with [`EventSourcingError::InvalidEvent`] carrying a copy of the
/// event and every violation message.
pub fn validate_event(event: &Value) -> errors::Result<()> {
    validate_event_with(event, ValidateOptions::default())
}

#[tracing::instrument(skip(event))]
pub fn validate_event_with(event: &Value, options: ValidateOptions) -> errors::Result<()> {
    run("event", event_schema(), event, options)
        .into_result()
        .map_err(|e| EventSourcingError::invalid_event(event.clone(), e.message()))
}

/// Validates an aggregate definition.
///
/// Checks the definition itself, then its projection, then each command in
/// declaration order. The first failing stage decides the error; among
/// commands, the first invalid one is reported.
pub fn validate_aggregate(aggregate: &Value, aggregate_name: &str) -> errors::Result<()> {
    validate_aggregate_with(aggregate, aggregate_name, ValidateOptions::default())
}

#[tracing::instrument(skip(aggregate, options))]
pub fn validate_aggregate_with(
    aggregate: &Value,
    aggregate_name: &str,
    options: ValidateOptions,
) -> errors::Result<()> {
    run("aggregate", aggregate_schema(), aggregate, options)
        .into_result()
        .map_err(|e| EventSourcingError::invalid_aggregate(aggregate_name, e.message()))?;

    let projection = aggregate.get("projection").unwrap_or(&NULL);
    run("projection", projection_schema(), projection, options)
        .into_result()
        .map_err(|e| EventSourcingError::invalid_projection(aggregate_name, e.message()))?;

    let commands = aggregate.get("commands").and_then(Value::as_object);
    for (command_name, command) in commands.into_iter().flat_map(|c| c.iter()) {
        run("command", command_schema(), command, options)
            .into_result()
            .map_err(|e| {
                EventSourcingError::invalid_command(aggregate_name, command_name, e.message())
            })?;
    }

    tracing::debug!(
        commands = commands.map_or(0, |c| c.len()),
        "aggregate definition accepted"
    );
    Ok(())
}

/// Validates an event repository: `getEvents` and `writeEvent` functions.
#[tracing::instrument(skip_all)]
pub fn validate_event_repository(repository: &Value) -> ValidationResult {
    run(
        "event_repository",
        event_repository_schema(),
        repository,
        ValidateOptions::default(),
    )
}

/// Validates a snapshot repository: `getSnapshot` and `writeSnapshot`
/// functions.
#[tracing::instrument(skip_all)]
pub fn validate_snapshot_repository(repository: &Value) -> ValidationResult {
    run(
        "snapshot_repository",
        snapshot_repository_schema(),
        repository,
        ValidateOptions::default(),
    )
}

/// Validates a notification handler: `invalidEventsFound` and
/// `eventWritten` functions.
#[tracing::instrument(skip_all)]
pub fn validate_notification_handler(handler: &Value) -> ValidationResult {
    run(
        "notification_handler",
        notification_handler_schema(),
        handler,
        ValidateOptions::default(),
    )
}

/// Validates an authorizer: an `assert` function.
#[tracing::instrument(skip_all)]
pub fn validate_authorizer(authorizer: &Value) -> ValidationResult {
    run(
        "authorizer",
        authorizer_schema(),
        authorizer,
        ValidateOptions::default(),
    )
}

#[cfg(test)]
mod tests {
    use common::Object;

    use super::*;

    #[test]
    fn non_object_event_is_invalid() {
        let err = validate_event(&Value::from("CREATE")).unwrap_err();
        assert_eq!(err.to_string(), "\"value\" must be of type object");
    }

    #[test]
    fn abort_early_reports_first_event_violation_only() {
        let err = validate_event_with(
            &Value::from(Object::new()),
            ValidateOptions { abort_early: true },
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "\"aggregateName\" is required");
    }

    #[test]
    fn aggregate_without_commands_stops_at_first_stage() {
        let aggregate = Value::from(
            Object::new()
                .with("idField", "id")
                .with("projection", Object::new()),
        );
        let err = validate_aggregate(&aggregate, "book").unwrap_err();

        assert!(matches!(err, EventSourcingError::InvalidAggregate { .. }));
        assert_eq!(
            err.to_string(),
            "invalid aggregate \"book\": \"commands\" is required"
        );
    }
}
