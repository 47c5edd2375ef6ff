//! Open object schemas.

use common::Value;

use crate::outcome::{ValidationDetail, ValidationResult};
use crate::rule::{Rule, Violation};

/// Label used when the validated value itself is rejected.
const ROOT_LABEL: &str = "value";

/// Options for a single validation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidateOptions {
    /// Stop at the first violation instead of reporting all of them.
    pub abort_early: bool,
}

/// A schema for an object with a fixed set of declared keys.
///
/// Schemas are open: keys that are not declared are ignored. Declared keys
/// are checked in declaration order, so violations are reported in that
/// order too.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectSchema {
    keys: Vec<(String, Rule)>,
}

impl ObjectSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a key. Redeclaring a key replaces its rule.
    pub fn key(mut self, name: impl Into<String>, rule: Rule) -> Self {
        let name = name.into();
        match self.keys.iter_mut().find(|(k, _)| *k == name) {
            Some((_, existing)) => *existing = rule,
            None => self.keys.push((name, rule)),
        }
        self
    }

    pub fn keys(&self) -> impl Iterator<Item = (&str, &Rule)> {
        self.keys.iter().map(|(k, r)| (k.as_str(), r))
    }

    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.keys.iter().find(|(k, _)| k == name).map(|(_, r)| r)
    }

    /// Validates a value, reporting every violation.
    pub fn validate(&self, value: &Value) -> ValidationResult {
        self.validate_with(value, ValidateOptions::default())
    }

    pub fn validate_with(&self, value: &Value, options: ValidateOptions) -> ValidationResult {
        let Some(object) = value.as_object() else {
            return vec![ValidationDetail::new(
                Vec::new(),
                ROOT_LABEL,
                Violation::NotAnObject,
            )]
            .into();
        };

        let mut details = Vec::new();
        let mut violations = Vec::new();
        for (name, rule) in &self.keys {
            rule.check(object.get(name), &mut violations);
            details.extend(
                violations
                    .drain(..)
                    .map(|v| ValidationDetail::new(vec![name.clone()], name.as_str(), v)),
            );
            if options.abort_early && !details.is_empty() {
                details.truncate(1);
                break;
            }
        }
        details.into()
    }
}
