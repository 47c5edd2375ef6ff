//! Operations checked by an authorizer.

use common::Identifier;
use serde::{Deserialize, Serialize};

/// An operation a user attempted against an aggregate instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// The kind of operation, e.g. `"runCommand"`.
    #[serde(rename = "type")]
    pub operation_type: String,

    pub aggregate_name: String,

    pub aggregate_id: Identifier,

    /// Set when the operation runs a command.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command_name: Option<String>,
}

impl Operation {
    /// Operation type used when a command is run against an aggregate.
    pub const RUN_COMMAND: &'static str = "runCommand";

    pub fn new(
        operation_type: impl Into<String>,
        aggregate_name: impl Into<String>,
        aggregate_id: impl Into<Identifier>,
    ) -> Self {
        Self {
            operation_type: operation_type.into(),
            aggregate_name: aggregate_name.into(),
            aggregate_id: aggregate_id.into(),
            command_name: None,
        }
    }

    /// Creates a `runCommand` operation for the given command.
    pub fn run_command(
        aggregate_name: impl Into<String>,
        aggregate_id: impl Into<Identifier>,
        command_name: impl Into<String>,
    ) -> Self {
        Self::new(Self::RUN_COMMAND, aggregate_name, aggregate_id).with_command(command_name)
    }

    pub fn with_command(mut self, command_name: impl Into<String>) -> Self {
        self.command_name = Some(command_name.into());
        self
    }
}

/// Renders as `<type> on <aggregateName> <aggregateId>`.
impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} on {} {}",
            self.operation_type, self.aggregate_name, self.aggregate_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_command_sets_type_and_command() {
        let op = Operation::run_command("book", "AjLS_AMKa", "setName");
        assert_eq!(op.operation_type, "runCommand");
        assert_eq!(op.command_name.as_deref(), Some("setName"));
        assert_eq!(op.to_string(), "runCommand on book AjLS_AMKa");
    }

    #[test]
    fn serializes_with_host_field_names() {
        let op = Operation::run_command("book", 12, "setName");
        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "runCommand",
                "aggregateName": "book",
                "aggregateId": 12,
                "commandName": "setName",
            })
        );

        let without_command = serde_json::to_value(Operation::new("read", "book", 12)).unwrap();
        assert!(without_command.get("commandName").is_none());
    }
}
