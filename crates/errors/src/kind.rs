//! Kind tags and their handling categories.

use serde::Serialize;

/// The name of an error kind, independent of its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    #[serde(rename = "AggregateNotFoundError")]
    AggregateNotFound,
    #[serde(rename = "DuplicateAggregateError")]
    DuplicateAggregate,
    #[serde(rename = "EventPayloadError")]
    EventPayload,
    #[serde(rename = "InvalidAggregateError")]
    InvalidAggregate,
    #[serde(rename = "InvalidCommandError")]
    InvalidCommand,
    #[serde(rename = "InvalidCommandParamsError")]
    InvalidCommandParams,
    #[serde(rename = "InvalidEventError")]
    InvalidEvent,
    #[serde(rename = "InvalidProjectionError")]
    InvalidProjection,
    #[serde(rename = "InvariantViolatedError")]
    InvariantViolated,
    #[serde(rename = "MaxCommandAttemptsError")]
    MaxCommandAttempts,
    #[serde(rename = "UnauthorizedError")]
    Unauthorized,
    #[serde(rename = "UnknownAggregateError")]
    UnknownAggregate,
    #[serde(rename = "UnknownCommandError")]
    UnknownCommand,
    #[serde(rename = "UnknownEventTypeError")]
    UnknownEventType,
}

/// How a host runtime is expected to treat an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Malformed configuration, events or parameters. Never retried.
    Validation,
    /// The request does not match current system state. The caller decides
    /// per kind whether to retry or report.
    Runtime,
    /// The command's retry budget is spent.
    RetryExhausted,
    /// Rejected by an authorizer. Must reach the boundary unchanged.
    Authorization,
    /// Projection state failed its own invariant check. Fatal to the
    /// operation.
    Invariant,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 14] = [
        ErrorKind::AggregateNotFound,
        ErrorKind::DuplicateAggregate,
        ErrorKind::EventPayload,
        ErrorKind::InvalidAggregate,
        ErrorKind::InvalidCommand,
        ErrorKind::InvalidCommandParams,
        ErrorKind::InvalidEvent,
        ErrorKind::InvalidProjection,
        ErrorKind::InvariantViolated,
        ErrorKind::MaxCommandAttempts,
        ErrorKind::Unauthorized,
        ErrorKind::UnknownAggregate,
        ErrorKind::UnknownCommand,
        ErrorKind::UnknownEventType,
    ];

    /// Returns the kind's name, e.g. `"AggregateNotFoundError"`.
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::AggregateNotFound => "AggregateNotFoundError",
            ErrorKind::DuplicateAggregate => "DuplicateAggregateError",
            ErrorKind::EventPayload => "EventPayloadError",
            ErrorKind::InvalidAggregate => "InvalidAggregateError",
            ErrorKind::InvalidCommand => "InvalidCommandError",
            ErrorKind::InvalidCommandParams => "InvalidCommandParamsError",
            ErrorKind::InvalidEvent => "InvalidEventError",
            ErrorKind::InvalidProjection => "InvalidProjectionError",
            ErrorKind::InvariantViolated => "InvariantViolatedError",
            ErrorKind::MaxCommandAttempts => "MaxCommandAttemptsError",
            ErrorKind::Unauthorized => "UnauthorizedError",
            ErrorKind::UnknownAggregate => "UnknownAggregateError",
            ErrorKind::UnknownCommand => "UnknownCommandError",
            ErrorKind::UnknownEventType => "UnknownEventTypeError",
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ErrorKind::InvalidEvent
            | ErrorKind::InvalidAggregate
            | ErrorKind::InvalidProjection
            | ErrorKind::InvalidCommand
            | ErrorKind::InvalidCommandParams => ErrorCategory::Validation,
            ErrorKind::AggregateNotFound
            | ErrorKind::DuplicateAggregate
            | ErrorKind::UnknownAggregate
            | ErrorKind::UnknownCommand
            | ErrorKind::UnknownEventType
            | ErrorKind::EventPayload => ErrorCategory::Runtime,
            ErrorKind::MaxCommandAttempts => ErrorCategory::RetryExhausted,
            ErrorKind::Unauthorized => ErrorCategory::Authorization,
            ErrorKind::InvariantViolated => ErrorCategory::Invariant,
        }
    }

    /// Whether the failure ends the operation regardless of caller policy.
    ///
    /// Only runtime-domain kinds leave retrying up to the caller.
    pub fn is_terminal(&self) -> bool {
        self.category() != ErrorCategory::Runtime
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn names_are_unique_and_suffixed() {
        let names: HashSet<_> = ErrorKind::ALL.iter().map(ErrorKind::name).collect();
        assert_eq!(names.len(), ErrorKind::ALL.len());
        assert!(names.iter().all(|n| n.ends_with("Error")));
    }

    #[test]
    fn serialized_name_matches_name() {
        for kind in ErrorKind::ALL {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, serde_json::json!(kind.name()));
        }
    }

    #[test]
    fn only_runtime_kinds_are_non_terminal() {
        assert!(!ErrorKind::DuplicateAggregate.is_terminal());
        assert!(!ErrorKind::AggregateNotFound.is_terminal());
        assert!(ErrorKind::InvalidEvent.is_terminal());
        assert!(ErrorKind::MaxCommandAttempts.is_terminal());
        assert!(ErrorKind::Unauthorized.is_terminal());
        assert!(ErrorKind::InvariantViolated.is_terminal());
    }

    #[test]
    fn structural_kinds_are_validation() {
        for kind in [
            ErrorKind::InvalidEvent,
            ErrorKind::InvalidAggregate,
            ErrorKind::InvalidProjection,
            ErrorKind::InvalidCommand,
        ] {
            assert_eq!(kind.category(), ErrorCategory::Validation);
        }
    }
}
