use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Value;

/// Identifier of an aggregate instance or an event.
///
/// Hosts use either numeric or textual ids, so both are accepted. Ids are
/// kept exactly as supplied; `Number(7)` and `Text("7")` are different ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Identifier {
    Number(i64),
    Text(String),
}

impl Identifier {
    /// Reads an identifier out of a structural value.
    ///
    /// Returns `None` for anything but integral numbers and strings.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(Identifier::Number),
            Value::String(s) => Some(Identifier::Text(s.clone())),
            _ => None,
        }
    }

    /// Returns the textual form, if this is a text id.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Identifier::Text(s) => Some(s),
            Identifier::Number(_) => None,
        }
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Identifier::Number(n) => write!(f, "{n}"),
            Identifier::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for Identifier {
    fn from(s: &str) -> Self {
        Identifier::Text(s.to_string())
    }
}

impl From<String> for Identifier {
    fn from(s: String) -> Self {
        Identifier::Text(s)
    }
}

impl From<i64> for Identifier {
    fn from(n: i64) -> Self {
        Identifier::Number(n)
    }
}

impl From<i32> for Identifier {
    fn from(n: i32) -> Self {
        Identifier::Number(n.into())
    }
}

impl From<Uuid> for Identifier {
    fn from(uuid: Uuid) -> Self {
        Identifier::Text(uuid.to_string())
    }
}

impl From<Identifier> for Value {
    fn from(id: Identifier) -> Self {
        match id {
            Identifier::Number(n) => Value::from(n),
            Identifier::Text(s) => Value::String(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_displays_without_quotes() {
        assert_eq!(Identifier::from("AjLS_AMKa").to_string(), "AjLS_AMKa");
        assert_eq!(Identifier::from(42).to_string(), "42");
    }

    #[test]
    fn identifier_from_uuid_is_text() {
        let uuid = Uuid::new_v4();
        let id = Identifier::from(uuid);
        assert_eq!(id.as_str(), Some(uuid.to_string().as_str()));
    }

    #[test]
    fn identifier_from_value_accepts_numbers_and_strings() {
        assert_eq!(
            Identifier::from_value(&Value::from(7)),
            Some(Identifier::Number(7))
        );
        assert_eq!(
            Identifier::from_value(&Value::from("x1")),
            Some(Identifier::Text("x1".to_string()))
        );
        assert_eq!(Identifier::from_value(&Value::from(1.5)), None);
        assert_eq!(Identifier::from_value(&Value::Null), None);
    }

    #[test]
    fn identifier_serialization_is_untagged() {
        let json = serde_json::to_string(&Identifier::from(3)).unwrap();
        assert_eq!(json, "3");

        let id: Identifier = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(id, Identifier::Text("abc".to_string()));
    }
}
