use std::collections::HashMap;

use super::value::Value;

/// Builds the dot-path index of every leaf under `root`.
///
/// Objects are descended into and never indexed themselves; arrays are
/// leaves, so array elements have no dotted path.
pub fn flatten(root: &HashMap<String, Value>) -> HashMap<String, Value> {
    let mut index = HashMap::new();
    flatten_into("", root, &mut index);
    index
}

fn flatten_into(prefix: &str, src: &HashMap<String, Value>, dst: &mut HashMap<String, Value>) {
    for (key, value) in src {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };

        match value {
            Value::Object(child) => flatten_into(&path, child, dst),
            leaf => {
                dst.insert(path, leaf.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flatten_json(json: &str) -> HashMap<String, Value> {
        match Value::from(serde_json::from_str::<serde_json::Value>(json).unwrap()) {
            Value::Object(root) => flatten(&root),
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_nested_objects_are_joined_with_dots() {
        let index = flatten_json(r#"{"a": {"b": {"c": "deep"}}, "top": true}"#);

        assert_eq!(index.len(), 2);
        assert_eq!(index["a.b.c"], Value::String("deep".into()));
        assert_eq!(index["top"], Value::Bool(true));
    }

    #[test]
    fn test_objects_are_never_leaves() {
        let index = flatten_json(r#"{"a": {"b": 1}, "empty": {}}"#);

        assert!(!index.contains_key("a"));
        assert!(!index.contains_key("empty"));
        assert!(index.values().all(|v| !v.is_object()));
    }

    #[test]
    fn test_arrays_are_leaves() {
        let index = flatten_json(r#"{"list": [{"inner": 1}, 2], "nil": null}"#);

        assert_eq!(index.len(), 2);
        assert!(matches!(index["list"], Value::Array(ref items) if items.len() == 2));
        assert!(!index.contains_key("list.inner"));
        assert_eq!(index["nil"], Value::Null);
    }
}
