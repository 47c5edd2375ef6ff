//! Structural validation of event-sourcing contracts.
//!
//! This crate checks the shapes a host runtime is configured with or fed:
//! - events, via [`validate_event`]
//! - aggregate definitions with their projection and commands, via
//!   [`validate_aggregate`]
//! - event/snapshot repositories, notification handlers and authorizers,
//!   via the `validate_*` functions returning a [`ValidationResult`]
//!
//! All schemas are open: undeclared keys are ignored. Functions are
//! checked only for being callable.

pub mod contracts;
pub mod object;
pub mod outcome;
pub mod rule;
pub mod validate;

pub use contracts::{
    aggregate_schema, authorizer_schema, command_schema, event_repository_schema, event_schema,
    notification_handler_schema, projection_schema, snapshot_repository_schema,
};
pub use object::{ObjectSchema, ValidateOptions};
pub use outcome::{ValidationDetail, ValidationError, ValidationResult};
pub use rule::{NumberCheck, Rule, RuleKind, Violation};
pub use validate::{
    validate_aggregate, validate_aggregate_with, validate_authorizer, validate_event,
    validate_event_repository, validate_event_with, validate_notification_handler,
    validate_snapshot_repository,
};
