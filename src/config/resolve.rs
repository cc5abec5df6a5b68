//! Dot-path resolution against the raw configuration tree.
//!
//! Scalar getters answer from the flattened index; this walk backs
//! [`get_map`](super::ConfigStore::get_map) and turns a miss into an error
//! naming the exact segment where resolution stopped.

use std::collections::HashMap;

use super::defaults::Defaults;
use super::value::Value;
use super::ConfigError;

/// Walks `path` segment by segment from `root`.
///
/// Fails with [`ConfigError::NotAnObject`] when an intermediate node is not an
/// object and with [`ConfigError::NoSuchKey`] when a segment is absent.
pub fn walk<'a>(root: &'a HashMap<String, Value>, path: &str) -> Result<&'a Value, ConfigError> {
    let mut current = root;
    let mut prefix = String::new();
    let mut segments = path.split('.').peekable();

    while let Some(segment) = segments.next() {
        let value = current.get(segment).ok_or_else(|| ConfigError::NoSuchKey {
            prefix: prefix.clone(),
            segment: segment.to_string(),
        })?;

        if !prefix.is_empty() {
            prefix.push('.');
        }
        prefix.push_str(segment);

        if segments.peek().is_none() {
            return Ok(value);
        }

        current = match value {
            Value::Object(map) => map,
            _ => return Err(ConfigError::NotAnObject { prefix }),
        };
    }

    // `split` always yields at least one segment
    Err(ConfigError::NoSuchKey {
        prefix,
        segment: String::new(),
    })
}

/// Resolves `path` in the tree, falling back to `defaults` by the full path.
pub fn resolve<'a>(
    root: &'a HashMap<String, Value>,
    path: &str,
    defaults: &'a Defaults,
) -> Result<&'a Value, ConfigError> {
    match walk(root, path) {
        Ok(value) => Ok(value),
        Err(err) if err.is_missing() => defaults.get(path).ok_or(err),
        Err(err) => Err(err),
    }
}
