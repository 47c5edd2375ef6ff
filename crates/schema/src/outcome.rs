//! Validation outcomes.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

use crate::rule::Violation;

/// One rejected key.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationDetail {
    /// Rendered message, e.g. `"getEvents" is required`.
    pub message: String,
    /// Keys from the validated value down to the offending key. Empty when
    /// the value itself was rejected.
    pub path: Vec<String>,
    /// The name the message refers to.
    pub label: String,
    pub violation: Violation,
}

impl ValidationDetail {
    pub(crate) fn new(path: Vec<String>, label: impl Into<String>, violation: Violation) -> Self {
        let label = label.into();
        Self {
            message: violation.message(&label),
            path,
            label,
            violation,
        }
    }
}

impl Serialize for ValidationDetail {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("ValidationDetail", 4)?;
        s.serialize_field("message", &self.message)?;
        s.serialize_field("path", &self.path)?;
        s.serialize_field("type", self.violation.code())?;
        s.serialize_field("label", &self.label)?;
        s.end()
    }
}

/// A value that did not satisfy a schema.
///
/// The message joins every detail message with `", "`.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
    details: Vec<ValidationDetail>,
}

impl ValidationError {
    pub(crate) fn new(details: Vec<ValidationDetail>) -> Self {
        let message = details
            .iter()
            .map(|d| d.message.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        Self { message, details }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn details(&self) -> &[ValidationDetail] {
        &self.details
    }

    /// Returns the labels of all rejected keys, in report order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.details.iter().map(|d| d.label.as_str())
    }
}

/// The checkable result of validating a host contract.
///
/// `error` is `None` when the value satisfied the schema.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationResult {
    pub error: Option<ValidationError>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self { error: None }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn into_result(self) -> Result<(), ValidationError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl From<Vec<ValidationDetail>> for ValidationResult {
    fn from(details: Vec<ValidationDetail>) -> Self {
        if details.is_empty() {
            Self::ok()
        } else {
            Self {
                error: Some(ValidationError::new(details)),
            }
        }
    }
}
