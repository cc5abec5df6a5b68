//! Caller-registered fallback values.
//!
//! Defaults are keyed by the same dot paths used for lookups and are
//! normalized into [`Value`]s at registration time, so a default of `80_u16`
//! reads back exactly like a parsed `80` literal.

use std::collections::HashMap;

use super::value::{Number, Value};

/// The value shapes accepted by [`ConfigStore::set_default`](super::ConfigStore::set_default).
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    Null,
    Bool(bool),
    Signed(i64),
    Unsigned(u64),
    Float(f64),
    String(String),
    Array(Vec<DefaultValue>),
    Map(HashMap<String, DefaultValue>),
    Value(Value),
}

impl DefaultValue {
    /// Converts into the tree representation, numbers as decimal text.
    pub fn normalize(self) -> Value {
        match self {
            DefaultValue::Null => Value::Null,
            DefaultValue::Bool(b) => Value::Bool(b),
            DefaultValue::Signed(n) => Value::Number(Number::from(n)),
            DefaultValue::Unsigned(n) => Value::Number(Number::from(n)),
            DefaultValue::Float(n) => Value::Number(Number::from(n)),
            DefaultValue::String(s) => Value::String(s),
            DefaultValue::Array(items) => {
                Value::Array(items.into_iter().map(DefaultValue::normalize).collect())
            }
            DefaultValue::Map(map) => Value::Object(
                map.into_iter()
                    .map(|(key, value)| (key, value.normalize()))
                    .collect(),
            ),
            DefaultValue::Value(value) => value,
        }
    }
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for DefaultValue {
            fn from(n: $t) -> Self {
                DefaultValue::Signed(i64::from(n))
            }
        })*
    };
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for DefaultValue {
            fn from(n: $t) -> Self {
                DefaultValue::Unsigned(u64::from(n))
            }
        })*
    };
}

impl_from_signed!(i8, i16, i32, i64);
impl_from_unsigned!(u8, u16, u32, u64);

impl From<isize> for DefaultValue {
    fn from(n: isize) -> Self {
        // isize is at most 64 bits on every supported target
        DefaultValue::Signed(n as i64)
    }
}

impl From<usize> for DefaultValue {
    fn from(n: usize) -> Self {
        DefaultValue::Unsigned(n as u64)
    }
}

impl From<f64> for DefaultValue {
    fn from(n: f64) -> Self {
        DefaultValue::Float(n)
    }
}

impl From<f32> for DefaultValue {
    fn from(n: f32) -> Self {
        DefaultValue::Value(Value::Number(Number::from(n)))
    }
}

impl From<bool> for DefaultValue {
    fn from(b: bool) -> Self {
        DefaultValue::Bool(b)
    }
}

impl From<&str> for DefaultValue {
    fn from(s: &str) -> Self {
        DefaultValue::String(s.to_string())
    }
}

impl From<String> for DefaultValue {
    fn from(s: String) -> Self {
        DefaultValue::String(s)
    }
}

impl From<Value> for DefaultValue {
    fn from(value: Value) -> Self {
        DefaultValue::Value(value)
    }
}

impl<T: Into<DefaultValue>> From<Vec<T>> for DefaultValue {
    fn from(items: Vec<T>) -> Self {
        DefaultValue::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<String>, T: Into<DefaultValue>> From<HashMap<K, T>> for DefaultValue {
    fn from(map: HashMap<K, T>) -> Self {
        DefaultValue::Map(
            map.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl<T: Into<DefaultValue>> From<Option<T>> for DefaultValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(DefaultValue::Null, Into::into)
    }
}

/// Path-addressed default values. No prefix fallback: a default for `a`
/// says nothing about `a.b`.
#[derive(Debug, Clone, Default)]
pub struct Defaults {
    values: HashMap<String, Value>,
}

impl Defaults {
    pub fn set(&mut self, path: impl Into<String>, value: impl Into<DefaultValue>) {
        let path = path.into();
        tracing::trace!(path = %path, "registering default");
        self.values.insert(path, value.into().normalize());
    }

    pub fn get(&self, path: &str) -> Option<&Value> {
        self.values.get(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(value: Option<&Value>) -> &str {
        value.and_then(Value::as_number).unwrap().as_str()
    }

    #[test]
    fn test_integers_normalize_to_decimal_text() {
        let mut defaults = Defaults::default();
        defaults.set("i8", -12i8);
        defaults.set("i64", -17286145274665i64);
        defaults.set("u64", u64::MAX);
        defaults.set("usize", 12usize);

        assert_eq!(number(defaults.get("i8")), "-12");
        assert_eq!(number(defaults.get("i64")), "-17286145274665");
        assert_eq!(number(defaults.get("u64")), "18446744073709551615");
        assert_eq!(number(defaults.get("usize")), "12");
    }

    #[test]
    fn test_floats_normalize_to_round_trip_text() {
        let mut defaults = Defaults::default();
        defaults.set("f", 0.72631524721);
        defaults.set("p", 1563246315263.35152323132);

        assert_eq!(number(defaults.get("f")), "0.72631524721");

        defaults.set("f32", 0.1f32);
        assert_eq!(number(defaults.get("f32")), "0.1");
        assert_eq!(
            number(defaults.get("p")).parse::<f64>().unwrap(),
            1563246315263.35152323132
        );
    }

    #[test]
    fn test_maps_normalize_recursively() {
        let mut defaults = Defaults::default();
        defaults.set("m", HashMap::from([("port", 80u16)]));

        let map = defaults.get("m").and_then(Value::as_object).unwrap();
        assert_eq!(number(map.get("port")), "80");
    }

    #[test]
    fn test_no_prefix_fallback_and_replacement() {
        let mut defaults = Defaults::default();
        defaults.set("a.b", "first");
        defaults.set("a.b", "second");

        assert_eq!(defaults.get("a.b"), Some(&Value::String("second".into())));
        assert!(defaults.get("a").is_none());
        assert!(defaults.get("a.b.c").is_none());
    }

    #[test]
    fn test_non_numeric_defaults_are_stored_as_is() {
        let mut defaults = Defaults::default();
        defaults.set("b", true);
        defaults.set("list", vec!["x", "y"]);
        defaults.set("none", None::<i32>);

        assert_eq!(defaults.get("b"), Some(&Value::Bool(true)));
        assert_eq!(
            defaults.get("list"),
            Some(&Value::Array(vec![
                Value::String("x".into()),
                Value::String("y".into())
            ]))
        );
        assert_eq!(defaults.get("none"), Some(&Value::Null));
    }
}
