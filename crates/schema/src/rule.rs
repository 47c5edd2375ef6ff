//! Per-key rules and the violations they report.

use common::Value;

/// An extra constraint on a number, checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberCheck {
    Integer,
    /// Strictly greater than the limit.
    Greater(i64),
    /// Strictly greater than zero.
    Positive,
}

/// The type a key must have, with its type-specific constraints.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleKind {
    /// A non-empty string.
    String,
    Number(Vec<NumberCheck>),
    Boolean,
    Object,
    Function,
    /// Any one of the listed kinds. The first kind whose base type matches
    /// decides the outcome.
    Alternatives(Vec<RuleKind>),
}

/// Why a value was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    Required,
    NotAString,
    EmptyString,
    NotANumber,
    NotAnInteger,
    NotGreaterThan(i64),
    NotPositive,
    NotABoolean,
    NotAnObject,
    NotAFunction,
    /// None of the alternatives' types matched; holds their type labels.
    NoMatchingAlternative(Vec<&'static str>),
}

/// A rule for one key of an object schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    kind: RuleKind,
    required: bool,
}

impl Rule {
    pub fn new(kind: RuleKind) -> Self {
        Self {
            kind,
            required: false,
        }
    }

    pub fn string() -> Self {
        Self::new(RuleKind::String)
    }

    pub fn number() -> Self {
        Self::new(RuleKind::number())
    }

    pub fn number_with(checks: impl IntoIterator<Item = NumberCheck>) -> Self {
        Self::new(RuleKind::Number(checks.into_iter().collect()))
    }

    pub fn boolean() -> Self {
        Self::new(RuleKind::Boolean)
    }

    pub fn object() -> Self {
        Self::new(RuleKind::Object)
    }

    pub fn function() -> Self {
        Self::new(RuleKind::Function)
    }

    pub fn any_of(kinds: impl IntoIterator<Item = RuleKind>) -> Self {
        Self::new(RuleKind::Alternatives(kinds.into_iter().collect()))
    }

    /// Marks the key as required: an absent key is a violation.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn kind(&self) -> &RuleKind {
        &self.kind
    }

    /// Checks a possibly absent value, appending violations to `out`.
    pub(crate) fn check(&self, value: Option<&Value>, out: &mut Vec<Violation>) {
        match value {
            None if self.required => out.push(Violation::Required),
            None => {}
            Some(value) => self.kind.check(value, out),
        }
    }
}

impl RuleKind {
    /// A number without further constraints.
    pub fn number() -> Self {
        RuleKind::Number(Vec::new())
    }

    /// Type label used in alternative listings.
    pub fn label(&self) -> &'static str {
        match self {
            RuleKind::String => "string",
            RuleKind::Number(_) => "number",
            RuleKind::Boolean => "boolean",
            RuleKind::Object => "object",
            RuleKind::Function => "function",
            RuleKind::Alternatives(_) => "alternatives",
        }
    }

    fn base_matches(&self, value: &Value) -> bool {
        match self {
            RuleKind::String => matches!(value, Value::String(_)),
            RuleKind::Number(_) => to_number(value).is_some(),
            RuleKind::Boolean => to_bool(value).is_some(),
            RuleKind::Object => matches!(value, Value::Object(_)),
            RuleKind::Function => value.is_function(),
            RuleKind::Alternatives(kinds) => kinds.iter().any(|k| k.base_matches(value)),
        }
    }

    fn check(&self, value: &Value, out: &mut Vec<Violation>) {
        match self {
            RuleKind::String => match value {
                Value::String(s) if s.is_empty() => out.push(Violation::EmptyString),
                Value::String(_) => {}
                _ => out.push(Violation::NotAString),
            },
            RuleKind::Number(checks) => match to_number(value) {
                Some(n) => check_number(&n, checks, out),
                None => out.push(Violation::NotANumber),
            },
            RuleKind::Boolean if !self.base_matches(value) => out.push(Violation::NotABoolean),
            RuleKind::Object if !self.base_matches(value) => out.push(Violation::NotAnObject),
            RuleKind::Function if !self.base_matches(value) => out.push(Violation::NotAFunction),
            RuleKind::Boolean | RuleKind::Object | RuleKind::Function => {}
            RuleKind::Alternatives(kinds) => match kinds.iter().find(|k| k.base_matches(value)) {
                Some(kind) => kind.check(value, out),
                None => out.push(Violation::NoMatchingAlternative(
                    kinds.iter().map(RuleKind::label).collect(),
                )),
            },
        }
    }
}

/// Reads a number, converting numeric strings the way JSON hosts send them.
fn to_number(value: &Value) -> Option<serde_json::Number> {
    match value {
        Value::Number(n) => Some(n.clone()),
        Value::String(s) => parse_number(s.trim()),
        _ => None,
    }
}

fn parse_number(s: &str) -> Option<serde_json::Number> {
    if let Ok(i) = s.parse::<i64>() {
        return Some(i.into());
    }
    if let Ok(u) = s.parse::<u64>() {
        return Some(u.into());
    }
    // f64 parsing also accepts "inf" and "NaN"; only decimal notation counts
    let decimal = s
        .trim_start_matches(['+', '-'])
        .starts_with(|c: char| c.is_ascii_digit() || c == '.');
    if !decimal {
        return None;
    }
    s.parse::<f64>().ok().and_then(serde_json::Number::from_f64)
}

/// Reads a boolean, converting `"true"` and `"false"` in any case.
fn to_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) if s.eq_ignore_ascii_case("true") => Some(true),
        Value::String(s) if s.eq_ignore_ascii_case("false") => Some(false),
        _ => None,
    }
}

fn check_number(n: &serde_json::Number, checks: &[NumberCheck], out: &mut Vec<Violation>) {
    for check in checks {
        let passes = match check {
            NumberCheck::Integer => {
                n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.fract() == 0.0)
            }
            NumberCheck::Greater(limit) => exceeds(n, *limit),
            NumberCheck::Positive => exceeds(n, 0),
        };
        if !passes {
            out.push(match check {
                NumberCheck::Integer => Violation::NotAnInteger,
                NumberCheck::Greater(limit) => Violation::NotGreaterThan(*limit),
                NumberCheck::Positive => Violation::NotPositive,
            });
        }
    }
}

fn exceeds(n: &serde_json::Number, limit: i64) -> bool {
    if let Some(i) = n.as_i64() {
        i > limit
    } else if n.is_u64() {
        // only values above i64::MAX land here
        true
    } else {
        n.as_f64().is_some_and(|f| f > limit as f64)
    }
}

impl Violation {
    /// Renders the violation for the given key label.
    pub fn message(&self, label: &str) -> String {
        match self {
            Violation::Required => format!("\"{label}\" is required"),
            Violation::NotAString => format!("\"{label}\" must be a string"),
            Violation::EmptyString => format!("\"{label}\" is not allowed to be empty"),
            Violation::NotANumber => format!("\"{label}\" must be a number"),
            Violation::NotAnInteger => format!("\"{label}\" must be an integer"),
            Violation::NotGreaterThan(limit) => format!("\"{label}\" must be greater than {limit}"),
            Violation::NotPositive => format!("\"{label}\" must be a positive number"),
            Violation::NotABoolean => format!("\"{label}\" must be a boolean"),
            Violation::NotAnObject => format!("\"{label}\" must be of type object"),
            Violation::NotAFunction => format!("\"{label}\" must be of type function"),
            Violation::NoMatchingAlternative(labels) => {
                format!("\"{label}\" must be one of [{}]", labels.join(", "))
            }
        }
    }

    /// Machine-readable violation code.
    pub fn code(&self) -> &'static str {
        match self {
            Violation::Required => "any.required",
            Violation::NotAString => "string.base",
            Violation::EmptyString => "string.empty",
            Violation::NotANumber => "number.base",
            Violation::NotAnInteger => "number.integer",
            Violation::NotGreaterThan(_) => "number.greater",
            Violation::NotPositive => "number.positive",
            Violation::NotABoolean => "boolean.base",
            Violation::NotAnObject => "object.base",
            Violation::NotAFunction => "function.base",
            Violation::NoMatchingAlternative(_) => "alternatives.types",
        }
    }
}

#[cfg(test)]
mod tests {
    use common::{Callable, Object};

    use super::*;

    fn violations(rule: &Rule, value: Option<Value>) -> Vec<Violation> {
        let mut out = Vec::new();
        rule.check(value.as_ref(), &mut out);
        out
    }

    #[test]
    fn absent_keys_only_fail_when_required() {
        assert!(violations(&Rule::string(), None).is_empty());
        assert_eq!(
            violations(&Rule::string().required(), None),
            vec![Violation::Required]
        );
    }

    #[test]
    fn strings_must_be_non_empty() {
        let rule = Rule::string();
        assert!(violations(&rule, Some(Value::from("CREATE"))).is_empty());
        assert_eq!(
            violations(&rule, Some(Value::from(""))),
            vec![Violation::EmptyString]
        );
        assert_eq!(
            violations(&rule, Some(Value::from(10))),
            vec![Violation::NotAString]
        );
    }

    #[test]
    fn null_is_present_but_mistyped() {
        assert_eq!(
            violations(&Rule::function().required(), Some(Value::Null)),
            vec![Violation::NotAFunction]
        );
    }

    #[test]
    fn number_checks_run_in_order() {
        let rule = Rule::number_with([NumberCheck::Integer, NumberCheck::Greater(0)]);

        assert!(violations(&rule, Some(Value::from(1))).is_empty());
        assert!(violations(&rule, Some(Value::from(3.0))).is_empty());
        assert_eq!(
            violations(&rule, Some(Value::from(0))),
            vec![Violation::NotGreaterThan(0)]
        );
        assert_eq!(
            violations(&rule, Some(Value::from(0.5))),
            vec![Violation::NotAnInteger]
        );
        assert_eq!(
            violations(&rule, Some(Value::from(-1.5))),
            vec![Violation::NotAnInteger, Violation::NotGreaterThan(0)]
        );
        assert_eq!(
            violations(&rule, Some(Value::from("asdf"))),
            vec![Violation::NotANumber]
        );
    }

    #[test]
    fn numeric_strings_are_converted_before_checks() {
        let rule = Rule::number_with([NumberCheck::Integer, NumberCheck::Greater(0)]);

        assert!(violations(&rule, Some(Value::from("3"))).is_empty());
        assert!(violations(&rule, Some(Value::from(" 42 "))).is_empty());
        assert!(violations(&rule, Some(Value::from("3.0"))).is_empty());
        assert_eq!(
            violations(&rule, Some(Value::from("0"))),
            vec![Violation::NotGreaterThan(0)]
        );
        assert_eq!(
            violations(&rule, Some(Value::from("2.5"))),
            vec![Violation::NotAnInteger]
        );
        for text in ["", "   ", "3abc", "inf", "NaN", "0x10"] {
            assert_eq!(
                violations(&rule, Some(Value::from(text))),
                vec![Violation::NotANumber],
                "{text:?}"
            );
        }
    }

    #[test]
    fn boolean_strings_are_converted() {
        let rule = Rule::boolean();
        assert!(violations(&rule, Some(Value::from(false))).is_empty());
        assert!(violations(&rule, Some(Value::from("true"))).is_empty());
        assert!(violations(&rule, Some(Value::from("FALSE"))).is_empty());
        assert_eq!(
            violations(&rule, Some(Value::from("yes"))),
            vec![Violation::NotABoolean]
        );
        assert_eq!(
            violations(&rule, Some(Value::from(1))),
            vec![Violation::NotABoolean]
        );
    }

    #[test]
    fn positive_is_strict() {
        let rule = Rule::number_with([NumberCheck::Positive]);
        assert_eq!(
            violations(&rule, Some(Value::from(0))),
            vec![Violation::NotPositive]
        );
        assert!(violations(&rule, Some(Value::from(u64::MAX))).is_empty());
    }

    #[test]
    fn alternatives_pick_the_matching_type() {
        let rule = Rule::any_of([RuleKind::number(), RuleKind::String]);

        assert!(violations(&rule, Some(Value::from(5))).is_empty());
        assert!(violations(&rule, Some(Value::from("x1"))).is_empty());
        assert!(violations(&rule, Some(Value::from("3"))).is_empty());
        assert_eq!(
            violations(&rule, Some(Value::from(""))),
            vec![Violation::EmptyString]
        );
        assert_eq!(
            violations(&rule, Some(Value::from(Object::new()))),
            vec![Violation::NoMatchingAlternative(vec!["number", "string"])]
        );
    }

    #[test]
    fn functions_are_checked_by_callability_only() {
        let rule = Rule::function();
        let callable = Callable::new("anything", |args| Value::from(args.len() as u64));
        assert!(violations(&rule, Some(Value::from(callable))).is_empty());
        assert_eq!(
            violations(&rule, Some(Value::from("fn:anything"))),
            vec![Violation::NotAFunction]
        );
    }

    #[test]
    fn messages_quote_the_label() {
        assert_eq!(
            Violation::Required.message("aggregateName"),
            "\"aggregateName\" is required"
        );
        assert_eq!(
            Violation::NotGreaterThan(0).message("sequenceNumber"),
            "\"sequenceNumber\" must be greater than 0"
        );
        assert_eq!(
            Violation::NoMatchingAlternative(vec!["number", "string"]).message("eventId"),
            "\"eventId\" must be one of [number, string]"
        );
        assert_eq!(Violation::NotAFunction.code(), "function.base");
    }
}
