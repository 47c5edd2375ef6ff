//! Schemas for the contracts a host runtime consumes.
//!
//! Built once on first use and never modified afterwards.

use std::sync::LazyLock;

use crate::object::ObjectSchema;
use crate::rule::{NumberCheck, Rule, RuleKind};

fn id_rule() -> Rule {
    Rule::any_of([RuleKind::number(), RuleKind::String]).required()
}

static EVENT_SCHEMA: LazyLock<ObjectSchema> = LazyLock::new(|| {
    ObjectSchema::new()
        .key("aggregateName", Rule::string().required())
        .key("aggregateId", id_rule())
        .key("eventId", id_rule())
        .key("type", Rule::string().required())
        .key("metadata", Rule::object().required())
        .key("payload", Rule::object().required())
        .key(
            "sequenceNumber",
            Rule::number_with([NumberCheck::Integer, NumberCheck::Greater(0)]).required(),
        )
});

static AGGREGATE_SCHEMA: LazyLock<ObjectSchema> = LazyLock::new(|| {
    ObjectSchema::new()
        .key("idField", Rule::string().required())
        .key("projection", Rule::object().required())
        .key("commands", Rule::object().required())
});

static PROJECTION_SCHEMA: LazyLock<ObjectSchema> = LazyLock::new(|| {
    ObjectSchema::new()
        .key("initialState", Rule::function().required())
        .key("applyEvent", Rule::function().required())
        .key("validateState", Rule::function().required())
});

static COMMAND_SCHEMA: LazyLock<ObjectSchema> = LazyLock::new(|| {
    ObjectSchema::new()
        .key("validateParams", Rule::function().required())
        .key("createEvent", Rule::function().required())
        .key("isCreateCommand", Rule::boolean())
        .key(
            "retries",
            Rule::number_with([NumberCheck::Integer, NumberCheck::Positive]),
        )
});

static EVENT_REPOSITORY_SCHEMA: LazyLock<ObjectSchema> = LazyLock::new(|| {
    ObjectSchema::new()
        .key("getEvents", Rule::function().required())
        .key("writeEvent", Rule::function().required())
});

static SNAPSHOT_REPOSITORY_SCHEMA: LazyLock<ObjectSchema> = LazyLock::new(|| {
    ObjectSchema::new()
        .key("getSnapshot", Rule::function().required())
        .key("writeSnapshot", Rule::function().required())
});

static NOTIFICATION_HANDLER_SCHEMA: LazyLock<ObjectSchema> = LazyLock::new(|| {
    ObjectSchema::new()
        .key("invalidEventsFound", Rule::function().required())
        .key("eventWritten", Rule::function().required())
});

static AUTHORIZER_SCHEMA: LazyLock<ObjectSchema> =
    LazyLock::new(|| ObjectSchema::new().key("assert", Rule::function().required()));

pub fn event_schema() -> &'static ObjectSchema {
    &EVENT_SCHEMA
}

pub fn aggregate_schema() -> &'static ObjectSchema {
    &AGGREGATE_SCHEMA
}

pub fn projection_schema() -> &'static ObjectSchema {
    &PROJECTION_SCHEMA
}

pub fn command_schema() -> &'static ObjectSchema {
    &COMMAND_SCHEMA
}

pub fn event_repository_schema() -> &'static ObjectSchema {
    &EVENT_REPOSITORY_SCHEMA
}

pub fn snapshot_repository_schema() -> &'static ObjectSchema {
    &SNAPSHOT_REPOSITORY_SCHEMA
}

pub fn notification_handler_schema() -> &'static ObjectSchema {
    &NOTIFICATION_HANDLER_SCHEMA
}

/// The authorizer contract: an object with an `assert` function.
///
/// Exposed for callers that validate authorizers themselves.
pub fn authorizer_schema() -> &'static ObjectSchema {
    &AUTHORIZER_SCHEMA
}
