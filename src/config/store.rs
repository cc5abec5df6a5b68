//! The configuration store and its typed getters.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

use serde::de::DeserializeOwned;

use super::builder::{ConfigStoreBuilder, MissingKeyPolicy};
use super::defaults::{DefaultValue, Defaults};
use super::file::{read_config_file, read_source};
use super::flatten::flatten;
use super::resolve::{resolve, walk};
use super::strip::strip_comments;
use super::value::Value;
use super::ConfigError;

/// A parsed document: the raw tree plus its leaf index.
#[derive(Debug, Default)]
pub(crate) struct Snapshot {
    tree: HashMap<String, Value>,
    index: HashMap<String, Value>,
}

/// A JSON-with-comments configuration with typed dot-path lookups.
///
/// Paths address nested objects with `.` (`"smtp.port"`). A lookup that the
/// parsed document cannot answer falls back to defaults registered with
/// [`set_default`](Self::set_default); defaults survive re-parsing.
///
/// The store is `Send + Sync`. Getters read a shared snapshot, and a parse
/// swaps in a fully built snapshot, so readers never observe a half-loaded
/// document.
///
/// ## Example
///
/// ```
/// use dotcfg::ConfigStore;
///
/// let store = ConfigStore::new();
/// store.set_default("http_server.port", 80);
/// store.parse_str(
///     r#"{
///         // local overrides
///         "http_server": { "enabled": true, "host": "127.0.0.1" }
///     }"#,
/// )?;
///
/// let addr = format!(
///     "{}:{}",
///     store.get_string("http_server.host")?,
///     store.get_int("http_server.port")?
/// );
/// assert_eq!(addr, "127.0.0.1:80");
/// # Ok::<(), dotcfg::ConfigError>(())
/// ```
#[derive(Debug)]
pub struct ConfigStore {
    pub(crate) snapshot: RwLock<Arc<Snapshot>>,
    pub(crate) defaults: RwLock<Defaults>,
    pub(crate) policy: MissingKeyPolicy,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ConfigStore {
    /// Creates an empty store that reports missing keys as errors.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> ConfigStoreBuilder {
        ConfigStoreBuilder::default()
    }

    pub fn missing_key_policy(&self) -> MissingKeyPolicy {
        self.policy
    }

    /// Reads and parses a document, replacing any previously parsed one.
    ///
    /// On failure the previous document stays in place.
    pub fn parse(&self, reader: impl Read) -> Result<(), ConfigError> {
        let bytes = read_source(reader)?;
        self.parse_bytes(&bytes)
    }

    /// Reads and parses the document at `path`.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let bytes = read_config_file(path.as_ref())?;
        self.parse_bytes(&bytes)
    }

    pub fn parse_str(&self, jsonc: &str) -> Result<(), ConfigError> {
        self.parse_bytes(jsonc.as_bytes())
    }

    pub fn parse_bytes(&self, jsonc: &[u8]) -> Result<(), ConfigError> {
        let json = strip_comments(jsonc);
        let decoded: serde_json::Value = serde_json::from_slice(&json)?;

        let tree = match Value::from(decoded) {
            Value::Object(tree) => tree,
            other => {
                return Err(ConfigError::NotAnObjectRoot {
                    found: other.kind(),
                })
            }
        };
        let index = flatten(&tree);
        tracing::debug!(leaves = index.len(), "parsed configuration");

        let snapshot = Arc::new(Snapshot { tree, index });
        *self.snapshot.write().unwrap_or_else(PoisonError::into_inner) = snapshot;
        Ok(())
    }

    /// Registers a fallback for `path`, replacing any earlier one.
    ///
    /// Numbers are stored as the decimal text a JSON literal of the same
    /// value would have, so getters treat defaults and parsed values alike.
    /// A default only answers lookups of exactly `path`.
    pub fn set_default(&self, path: impl Into<String>, value: impl Into<DefaultValue>) {
        self.defaults
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .set(path, value);
    }

    /// Returns the default registered for `path`, if any.
    pub fn default_value(&self, path: &str) -> Option<Value> {
        self.defaults().get(path).cloned()
    }

    /// Returns `true` if `path` names a value in the document or a default.
    pub fn contains(&self, path: &str) -> bool {
        let snapshot = self.snapshot();
        snapshot.index.contains_key(path)
            || walk(&snapshot.tree, path).is_ok()
            || self.defaults().get(path).is_some()
    }

    pub fn get_string(&self, path: &str) -> Result<String, ConfigError> {
        self.get_with(path, |value| match value {
            Value::String(s) => Ok(s),
            other => Err(mismatch(&other, "string")),
        })
    }

    pub fn get_bool(&self, path: &str) -> Result<bool, ConfigError> {
        self.get_with(path, |value| match value {
            Value::Bool(b) => Ok(b),
            other => Err(mismatch(&other, "bool")),
        })
    }

    pub fn get_int(&self, path: &str) -> Result<isize, ConfigError> {
        self.get_with(path, |value| parse_number(value, "int"))
    }

    pub fn get_int32(&self, path: &str) -> Result<i32, ConfigError> {
        self.get_with(path, |value| parse_number(value, "int32"))
    }

    pub fn get_int64(&self, path: &str) -> Result<i64, ConfigError> {
        self.get_with(path, |value| parse_number(value, "int64"))
    }

    pub fn get_uint(&self, path: &str) -> Result<usize, ConfigError> {
        self.get_with(path, |value| parse_number(value, "uint"))
    }

    pub fn get_uint32(&self, path: &str) -> Result<u32, ConfigError> {
        self.get_with(path, |value| parse_number(value, "uint32"))
    }

    pub fn get_uint64(&self, path: &str) -> Result<u64, ConfigError> {
        self.get_with(path, |value| parse_number(value, "uint64"))
    }

    /// Parses the number's literal text, so precision is only lost here.
    pub fn get_float64(&self, path: &str) -> Result<f64, ConfigError> {
        self.get_with(path, parse_float)
    }

    /// Returns the leaf at `path` without any conversion.
    ///
    /// Objects are not leaves; read them with [`get_map`](Self::get_map).
    pub fn get_any(&self, path: &str) -> Result<Value, ConfigError> {
        self.get_with(path, Ok)
    }

    /// Returns a snapshot of the object at `path`, numbers still as text.
    ///
    /// Unlike the scalar getters, a path that resolves to nothing is not an
    /// error: it yields `Ok(None)` whatever the missing-key policy.
    pub fn get_map(&self, path: &str) -> Result<Option<HashMap<String, Value>>, ConfigError> {
        let snapshot = self.snapshot();
        let defaults = self.defaults();

        match resolve(&snapshot.tree, path, &defaults) {
            Ok(Value::Object(map)) => Ok(Some(map.clone())),
            Ok(other) => Err(mismatch(other, "map")),
            Err(err) if err.is_missing() => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Deserializes the value at `path`, object or leaf, into `T`.
    ///
    /// Like [`get_map`](Self::get_map), a missing path yields `Ok(None)`.
    pub fn get_as<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, ConfigError> {
        let value = {
            let snapshot = self.snapshot();
            let defaults = self.defaults();

            match snapshot.index.get(path) {
                Some(leaf) => leaf.clone(),
                None => match resolve(&snapshot.tree, path, &defaults) {
                    Ok(value) => value.clone(),
                    Err(err) if err.is_missing() => return Ok(None),
                    Err(err) => return Err(err),
                },
            }
        };

        serde_json::to_value(&value)
            .and_then(serde_json::from_value)
            .map(Some)
            .map_err(|source| ConfigError::Deserialize {
                path: path.to_string(),
                source,
            })
    }

    fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.snapshot.read().unwrap_or_else(PoisonError::into_inner))
    }

    fn defaults(&self) -> RwLockReadGuard<'_, Defaults> {
        self.defaults.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Index, then defaults, then a tree walk to explain the miss.
    fn lookup(&self, path: &str) -> Result<Value, ConfigError> {
        let snapshot = self.snapshot();
        if let Some(leaf) = snapshot.index.get(path) {
            return Ok(leaf.clone());
        }

        if let Some(value) = self.defaults().get(path) {
            tracing::trace!(path, "using default value");
            return match value {
                Value::Object(_) => Err(ConfigError::NotALeaf {
                    path: path.to_string(),
                }),
                leaf => Ok(leaf.clone()),
            };
        }

        match walk(&snapshot.tree, path)? {
            Value::Object(_) => Err(ConfigError::NotALeaf {
                path: path.to_string(),
            }),
            leaf => Ok(leaf.clone()),
        }
    }

    fn get_with<T: Default>(
        &self,
        path: &str,
        cast: impl FnOnce(Value) -> Result<T, ConfigError>,
    ) -> Result<T, ConfigError> {
        match self.lookup(path) {
            Ok(value) => cast(value),
            Err(err) if err.is_missing() && self.policy == MissingKeyPolicy::ZeroValue => {
                tracing::warn!(
                    path,
                    error = %err,
                    "no value found for key, using zero value instead"
                );
                Ok(T::default())
            }
            Err(err) => Err(err),
        }
    }
}

fn mismatch(value: &Value, expected: &'static str) -> ConfigError {
    ConfigError::TypeMismatch {
        literal: value.to_string(),
        expected,
    }
}

fn parse_number<T: FromStr>(value: Value, kind: &'static str) -> Result<T, ConfigError> {
    match value {
        Value::Number(n) => n.as_str().parse().map_err(|_| ConfigError::InvalidNumber {
            literal: n.to_string(),
            kind,
        }),
        other => Err(mismatch(&other, "number")),
    }
}

/// Like [`parse_number`], but text that overflows to infinity is out of
/// range. Only an explicit `inf`/`NaN` spelling yields a non-finite value.
fn parse_float(value: Value) -> Result<f64, ConfigError> {
    match value {
        Value::Number(n) => match n.as_str().parse::<f64>() {
            Ok(f) if f.is_finite() || spells_non_finite(n.as_str()) => Ok(f),
            _ => Err(ConfigError::InvalidNumber {
                literal: n.to_string(),
                kind: "float64",
            }),
        },
        other => Err(mismatch(&other, "number")),
    }
}

fn spells_non_finite(text: &str) -> bool {
    let unsigned = text.trim_start_matches(['+', '-']);
    ["inf", "infinity", "nan"]
        .iter()
        .any(|spelling| unsigned.eq_ignore_ascii_case(spelling))
}
