use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A bindable filter value.
///
/// Covers every shape a filter clause operand can take: the scalar types a
/// relational column can hold, an array of values for the sequence operators
/// (`between`, `in`, `any`), and SQL NULL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Value {
    Int(i64),
    Uint(u64),
    Float(f64),
    String(String),
    Boolean(bool),
    Uuid(Uuid),
    Date(NaiveDate),
    Timestamp(DateTime<Utc>),
    Array(Vec<Value>),
    Null,
}

impl Value {
    /// Converts a deserialized JSON value into a filter value.
    ///
    /// Returns `None` for JSON objects: an object in a filter tree always
    /// denotes an operator map, never a bindable value.
    pub fn from_json(json: &serde_json::Value) -> Option<Value> {
        match json {
            serde_json::Value::Null => Some(Value::Null),
            serde_json::Value::Bool(b) => Some(Value::Boolean(*b)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(Value::Int(i))
                } else if let Some(u) = n.as_u64() {
                    Some(Value::Uint(u))
                } else {
                    n.as_f64().map(Value::Float)
                }
            }
            serde_json::Value::String(s) => Some(Value::String(s.clone())),
            serde_json::Value::Array(items) => items
                .iter()
                .map(Value::from_json)
                .collect::<Option<Vec<_>>>()
                .map(Value::Array),
            serde_json::Value::Object(_) => None,
        }
    }

    /// True for SQL NULL and for the literal string "null".
    ///
    /// String-typed payloads arrive when the tree was deserialized from a
    /// transport that cannot express null (e.g. query strings).
    pub fn is_null_like(&self) -> bool {
        match self {
            Value::Null => true,
            Value::String(s) => s == "null",
            _ => false,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            Value::Int(v) => Some(*v != 0),
            Value::Uint(v) => Some(*v != 0),
            Value::String(v) => match v.to_lowercase().as_str() {
                "true" | "1" => Some(true),
                "false" | "0" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<String> {
        match self {
            Value::Int(v) => Some(v.to_string()),
            Value::Uint(v) => Some(v.to_string()),
            Value::Float(v) => Some(v.to_string()),
            Value::String(v) => Some(v.clone()),
            Value::Boolean(v) => Some(v.to_string()),
            Value::Uuid(v) => Some(v.to_string()),
            Value::Date(v) => Some(v.to_string()),
            Value::Timestamp(v) => Some(v.to_rfc3339()),
            Value::Array(_) => None,
            Value::Null => Some("NULL".to_string()),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Uint(_) => "uint",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Boolean(_) => "boolean",
            Value::Uuid(_) => "uuid",
            Value::Date(_) => "date",
            Value::Timestamp(_) => "timestamp",
            Value::Array(_) => "array",
            Value::Null => "null",
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Value::Uuid(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_scalars() {
        assert_eq!(Value::from_json(&json!(null)), Some(Value::Null));
        assert_eq!(Value::from_json(&json!(true)), Some(Value::Boolean(true)));
        assert_eq!(Value::from_json(&json!(42)), Some(Value::Int(42)));
        assert_eq!(Value::from_json(&json!(1.5)), Some(Value::Float(1.5)));
        assert_eq!(
            Value::from_json(&json!("abc")),
            Some(Value::String("abc".to_string()))
        );
    }

    #[test]
    fn test_from_json_array() {
        assert_eq!(
            Value::from_json(&json!([1, "a"])),
            Some(Value::Array(vec![
                Value::Int(1),
                Value::String("a".to_string())
            ]))
        );
    }

    #[test]
    fn test_from_json_rejects_objects() {
        assert_eq!(Value::from_json(&json!({"eq": 1})), None);
        assert_eq!(Value::from_json(&json!([{"eq": 1}])), None);
    }

    #[test]
    fn test_null_like() {
        assert!(Value::Null.is_null_like());
        assert!(Value::String("null".to_string()).is_null_like());
        assert!(!Value::String("nullish".to_string()).is_null_like());
        assert!(!Value::Int(0).is_null_like());
    }

    #[test]
    fn test_as_string() {
        assert_eq!(Value::Int(7).as_string().as_deref(), Some("7"));
        assert_eq!(Value::Null.as_string().as_deref(), Some("NULL"));
        assert_eq!(Value::Array(vec![]).as_string(), None);
    }

    #[test]
    fn test_as_bool_coercions() {
        assert_eq!(Value::Boolean(true).as_bool(), Some(true));
        assert_eq!(Value::String("true".to_string()).as_bool(), Some(true));
        assert_eq!(Value::String("0".to_string()).as_bool(), Some(false));
        assert_eq!(Value::Int(1).as_bool(), Some(true));
        assert_eq!(Value::Null.as_bool(), None);
        assert_eq!(Value::String("maybe".to_string()).as_bool(), None);
    }
}
