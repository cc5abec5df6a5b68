//! The configuration value tree.
//!
//! Numbers are kept as the decimal text they were written with and only
//! converted to a machine type when a typed getter asks for one.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// A number stored as its exact decimal text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Number(String);

impl Number {
    pub(crate) fn from_text(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Returns the decimal text exactly as parsed or normalized.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Self(n.to_string())
    }
}

impl From<u64> for Number {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

impl From<f64> for Number {
    /// Uses the shortest decimal text that reads back as the same `f64`.
    fn from(n: f64) -> Self {
        Self(n.to_string())
    }
}

impl From<f32> for Number {
    /// Uses the `f32`'s own shortest text, so `0.1f32` stays `0.1`.
    fn from(n: f32) -> Self {
        Self(n.to_string())
    }
}

/// A node of the configuration tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Value>),
    Object(HashMap<String, Value>),
}

impl Value {
    /// Name of the value's kind, as used in cast failures.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "map",
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&HashMap<String, Value>> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            // With `arbitrary_precision` this is the literal text from the input.
            serde_json::Value::Number(n) => Value::Number(Number::from_text(n.to_string())),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

/// Renders strings bare and everything else as compact JSON, so cast
/// failures read `'value' is not a map` rather than `'"value"' ...`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            other => write_json(other, f),
        }
    }
}

fn write_json(value: &Value, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match value {
        Value::Null => f.write_str("null"),
        Value::Bool(b) => write!(f, "{b}"),
        Value::Number(n) => f.write_str(n.as_str()),
        Value::String(s) => write!(f, "{s:?}"),
        Value::Array(items) => {
            f.write_str("[")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                write_json(item, f)?;
            }
            f.write_str("]")
        }
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            f.write_str("{")?;
            for (i, key) in keys.into_iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{key:?}:")?;
                write_json(&map[key], f)?;
            }
            f.write_str("}")
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            // Non-finite defaults ("NaN", "inf") have no JSON form.
            Value::Number(n) => match serde_json::Number::from_str(n.as_str()) {
                Ok(number) => number.serialize(serializer),
                Err(_) => serializer.serialize_unit(),
            },
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(json: &str) -> Value {
        Value::from(serde_json::from_str::<serde_json::Value>(json).unwrap())
    }

    #[test]
    fn test_numbers_keep_their_literal_text() {
        let value = decode(r#"{"f": 1563246315263.35152323132, "big": 18446744073709551616}"#);
        let map = value.as_object().unwrap();

        assert_eq!(
            map["f"].as_number().unwrap().as_str(),
            "1563246315263.35152323132"
        );
        assert_eq!(
            map["big"].as_number().unwrap().as_str(),
            "18446744073709551616"
        );
    }

    #[test]
    fn test_float_number_uses_shortest_text() {
        assert_eq!(Number::from(0.72631524721).as_str(), "0.72631524721");
        assert_eq!(Number::from(80.0).as_str(), "80");
        assert_eq!(Number::from(0.1f32).as_str(), "0.1");
        assert_eq!(Number::from(-17286145274665i64).as_str(), "-17286145274665");
    }

    #[test]
    fn test_display_strings_are_bare() {
        assert_eq!(Value::String("val".into()).to_string(), "val");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(decode(r#"[1, "a", null]"#).to_string(), r#"[1,"a",null]"#);
        assert_eq!(decode(r#"{"b": 2, "a": 1}"#).to_string(), r#"{"a":1,"b":2}"#);
    }

    #[test]
    fn test_serialize_preserves_precision() {
        let value = decode(r#"{"n": 0.1000000000000000000001}"#);
        let text = serde_json::to_string(&value).unwrap();
        assert_eq!(text, r#"{"n":0.1000000000000000000001}"#);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(Value::Null.kind(), "null");
        assert_eq!(decode("{}").kind(), "map");
        assert_eq!(decode("[]").kind(), "array");
    }
}
