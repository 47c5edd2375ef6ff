//! The error kinds an event-sourcing runtime reports.

use common::{Identifier, Value};
use serde::Serialize;
use thiserror::Error;

use crate::kind::ErrorKind;
use crate::operation::Operation;

/// A well-defined failure raised by a host runtime or by contract validation.
///
/// Every variant carries the structured context needed to render a message
/// or decide on retries without parsing the message text. Values are built
/// once at the failure site and passed up unchanged.
///
/// Serializing yields the kind name under `"name"` plus the variant's fields
/// in camelCase; see [`EventSourcingError::report`] for a form that also
/// carries the message.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "name", rename_all_fields = "camelCase")]
pub enum EventSourcingError {
    /// Lookup of an aggregate instance failed.
    #[serde(rename = "AggregateNotFoundError")]
    #[error("cannot find aggregate \"{aggregate_name}\" with id \"{aggregate_id}\"")]
    AggregateNotFound {
        aggregate_name: String,
        aggregate_id: Identifier,
    },

    /// Creation collided with an existing id.
    #[serde(rename = "DuplicateAggregateError")]
    #[error("\"{aggregate_name}\" with id \"{aggregate_id}\" already exists")]
    DuplicateAggregate {
        aggregate_name: String,
        aggregate_id: Identifier,
    },

    /// A required payload key was absent while applying an event.
    #[serde(rename = "EventPayloadError")]
    #[error("event payload missing \"{key}\"")]
    EventPayload { event: Value, key: String },

    #[serde(rename = "InvalidAggregateError")]
    #[error("invalid aggregate \"{aggregate_name}\": {detail}")]
    InvalidAggregate {
        aggregate_name: String,
        detail: String,
    },

    #[serde(rename = "InvalidCommandError")]
    #[error("aggregate \"{aggregate_name}\": command \"{command_name}\" is invalid: {detail}")]
    InvalidCommand {
        aggregate_name: String,
        command_name: String,
        detail: String,
    },

    /// Caller-supplied parameters failed a command's own validation.
    #[serde(rename = "InvalidCommandParamsError")]
    #[error(
        "aggregate \"{aggregate_name}\": command \"{command_name}\" called with invalid params: {detail}"
    )]
    InvalidCommandParams {
        aggregate_name: String,
        command_name: String,
        detail: String,
    },

    /// The message is the validation detail itself.
    #[serde(rename = "InvalidEventError")]
    #[error("{detail}")]
    InvalidEvent { event: Value, detail: String },

    #[serde(rename = "InvalidProjectionError")]
    #[error("aggregate \"{aggregate_name}\" has an invalid projection: {detail}")]
    InvalidProjection {
        aggregate_name: String,
        detail: String,
    },

    /// A projection's own state check failed after applying events.
    ///
    /// The message is supplied by the projection; `state` is the offending
    /// state as it stood after the events were applied.
    #[serde(rename = "InvariantViolatedError")]
    #[error("{detail}")]
    InvariantViolated {
        aggregate_name: String,
        aggregate_id: Identifier,
        state: Value,
        detail: String,
    },

    /// The optimistic-concurrency retry budget is spent.
    #[serde(rename = "MaxCommandAttemptsError")]
    #[error("aggregate \"{aggregate_name}\": command \"{command_name}\" failed after {attempts} attempts")]
    MaxCommandAttempts {
        aggregate_name: String,
        command_name: String,
        attempts: u32,
    },

    #[serde(rename = "UnauthorizedError")]
    #[error("user {user_desc} is not allowed to call {operation}")]
    Unauthorized {
        operation: Operation,
        user_desc: String,
    },

    #[serde(rename = "UnknownAggregateError")]
    #[error("unknown aggregate \"{aggregate_name}\"")]
    UnknownAggregate { aggregate_name: String },

    #[serde(rename = "UnknownCommandError")]
    #[error("aggregate \"{aggregate_name}\": unknown command \"{command_name}\"")]
    UnknownCommand {
        aggregate_name: String,
        command_name: String,
    },

    #[serde(rename = "UnknownEventTypeError")]
    #[error("unknown event type \"{event_type}\"")]
    UnknownEventType { event_type: String },
}

impl EventSourcingError {
    pub fn aggregate_not_found(
        aggregate_name: impl Into<String>,
        aggregate_id: impl Into<Identifier>,
    ) -> Self {
        Self::AggregateNotFound {
            aggregate_name: aggregate_name.into(),
            aggregate_id: aggregate_id.into(),
        }
    }

    pub fn duplicate_aggregate(
        aggregate_name: impl Into<String>,
        aggregate_id: impl Into<Identifier>,
    ) -> Self {
        Self::DuplicateAggregate {
            aggregate_name: aggregate_name.into(),
            aggregate_id: aggregate_id.into(),
        }
    }

    pub fn event_payload(event: impl Into<Value>, key: impl Into<String>) -> Self {
        Self::EventPayload {
            event: event.into(),
            key: key.into(),
        }
    }

    pub fn invalid_aggregate(aggregate_name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::InvalidAggregate {
            aggregate_name: aggregate_name.into(),
            detail: detail.into(),
        }
    }

    pub fn invalid_command(
        aggregate_name: impl Into<String>,
        command_name: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self::InvalidCommand {
            aggregate_name: aggregate_name.into(),
            command_name: command_name.into(),
            detail: detail.into(),
        }
    }

    pub fn invalid_command_params(
        aggregate_name: impl Into<String>,
        command_name: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self::InvalidCommandParams {
            aggregate_name: aggregate_name.into(),
            command_name: command_name.into(),
            detail: detail.into(),
        }
    }

    pub fn invalid_event(event: impl Into<Value>, detail: impl Into<String>) -> Self {
        Self::InvalidEvent {
            event: event.into(),
            detail: detail.into(),
        }
    }

    pub fn invalid_projection(
        aggregate_name: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self::InvalidProjection {
            aggregate_name: aggregate_name.into(),
            detail: detail.into(),
        }
    }

    pub fn invariant_violated(
        aggregate_name: impl Into<String>,
        aggregate_id: impl Into<Identifier>,
        state: impl Into<Value>,
        detail: impl Into<String>,
    ) -> Self {
        Self::InvariantViolated {
            aggregate_name: aggregate_name.into(),
            aggregate_id: aggregate_id.into(),
            state: state.into(),
            detail: detail.into(),
        }
    }

    pub fn max_command_attempts(
        aggregate_name: impl Into<String>,
        command_name: impl Into<String>,
        attempts: u32,
    ) -> Self {
        Self::MaxCommandAttempts {
            aggregate_name: aggregate_name.into(),
            command_name: command_name.into(),
            attempts,
        }
    }

    pub fn unauthorized(operation: Operation, user_desc: impl Into<String>) -> Self {
        Self::Unauthorized {
            operation,
            user_desc: user_desc.into(),
        }
    }

    pub fn unknown_aggregate(aggregate_name: impl Into<String>) -> Self {
        Self::UnknownAggregate {
            aggregate_name: aggregate_name.into(),
        }
    }

    pub fn unknown_command(
        aggregate_name: impl Into<String>,
        command_name: impl Into<String>,
    ) -> Self {
        Self::UnknownCommand {
            aggregate_name: aggregate_name.into(),
            command_name: command_name.into(),
        }
    }

    pub fn unknown_event_type(event_type: impl Into<String>) -> Self {
        Self::UnknownEventType {
            event_type: event_type.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::AggregateNotFound { .. } => ErrorKind::AggregateNotFound,
            Self::DuplicateAggregate { .. } => ErrorKind::DuplicateAggregate,
            Self::EventPayload { .. } => ErrorKind::EventPayload,
            Self::InvalidAggregate { .. } => ErrorKind::InvalidAggregate,
            Self::InvalidCommand { .. } => ErrorKind::InvalidCommand,
            Self::InvalidCommandParams { .. } => ErrorKind::InvalidCommandParams,
            Self::InvalidEvent { .. } => ErrorKind::InvalidEvent,
            Self::InvalidProjection { .. } => ErrorKind::InvalidProjection,
            Self::InvariantViolated { .. } => ErrorKind::InvariantViolated,
            Self::MaxCommandAttempts { .. } => ErrorKind::MaxCommandAttempts,
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::UnknownAggregate { .. } => ErrorKind::UnknownAggregate,
            Self::UnknownCommand { .. } => ErrorKind::UnknownCommand,
            Self::UnknownEventType { .. } => ErrorKind::UnknownEventType,
        }
    }

    /// Returns the aggregate type the error concerns, if any.
    pub fn aggregate_name(&self) -> Option<&str> {
        match self {
            Self::AggregateNotFound { aggregate_name, .. }
            | Self::DuplicateAggregate { aggregate_name, .. }
            | Self::InvalidAggregate { aggregate_name, .. }
            | Self::InvalidCommand { aggregate_name, .. }
            | Self::InvalidCommandParams { aggregate_name, .. }
            | Self::InvalidProjection { aggregate_name, .. }
            | Self::InvariantViolated { aggregate_name, .. }
            | Self::MaxCommandAttempts { aggregate_name, .. }
            | Self::UnknownAggregate { aggregate_name }
            | Self::UnknownCommand { aggregate_name, .. } => Some(aggregate_name),
            Self::Unauthorized { operation, .. } => Some(&operation.aggregate_name),
            Self::EventPayload { .. } | Self::InvalidEvent { .. } | Self::UnknownEventType { .. } => {
                None
            }
        }
    }

    /// Returns the aggregate instance the error concerns, if any.
    pub fn aggregate_id(&self) -> Option<&Identifier> {
        match self {
            Self::AggregateNotFound { aggregate_id, .. }
            | Self::DuplicateAggregate { aggregate_id, .. }
            | Self::InvariantViolated { aggregate_id, .. } => Some(aggregate_id),
            Self::Unauthorized { operation, .. } => Some(&operation.aggregate_id),
            _ => None,
        }
    }

    /// Returns the command the error concerns, if any.
    pub fn command_name(&self) -> Option<&str> {
        match self {
            Self::InvalidCommand { command_name, .. }
            | Self::InvalidCommandParams { command_name, .. }
            | Self::MaxCommandAttempts { command_name, .. }
            | Self::UnknownCommand { command_name, .. } => Some(command_name),
            Self::Unauthorized { operation, .. } => operation.command_name.as_deref(),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.kind().is_terminal()
    }

    /// Renders the error as a JSON object with `name`, `message` and every
    /// structured field.
    pub fn report(&self) -> serde_json::Result<serde_json::Value> {
        let mut report = serde_json::to_value(self)?;
        if let Some(object) = report.as_object_mut() {
            object.insert("message".to_string(), self.to_string().into());
        }
        Ok(report)
    }
}

/// Result type for operations that fail with an [`EventSourcingError`].
pub type Result<T> = std::result::Result<T, EventSourcingError>;
