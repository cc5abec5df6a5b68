use std::sync::{Arc, RwLock};

use super::defaults::{DefaultValue, Defaults};
use super::store::{ConfigStore, Snapshot};

/// What scalar getters do when a path resolves to nothing and no default
/// is registered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingKeyPolicy {
    /// Return [`ConfigError::NoSuchKey`](super::ConfigError::NoSuchKey) or
    /// [`ConfigError::NotAnObject`](super::ConfigError::NotAnObject).
    #[default]
    Error,
    /// Log a warning and return the type's zero value.
    ZeroValue,
}

/// Builder for a [`ConfigStore`].
///
/// ## Example
///
/// ```
/// use dotcfg::{ConfigStore, MissingKeyPolicy};
///
/// let store = ConfigStore::builder()
///     .missing_key_policy(MissingKeyPolicy::ZeroValue)
///     .with_default("http_server.port", 80)
///     .build();
///
/// store.parse_str(r#"{ "http_server": { "host": "127.0.0.1" } } // local"#)?;
///
/// assert_eq!(store.get_string("http_server.host")?, "127.0.0.1");
/// assert_eq!(store.get_int("http_server.port")?, 80);
/// assert_eq!(store.get_int("http_server.timeout")?, 0);
/// # Ok::<(), dotcfg::ConfigError>(())
/// ```
#[derive(Debug, Default)]
#[must_use = "builders do nothing until .build() is called"]
pub struct ConfigStoreBuilder {
    policy: MissingKeyPolicy,
    defaults: Defaults,
}

impl ConfigStoreBuilder {
    /// Sets how missing keys are reported. Defaults to [`MissingKeyPolicy::Error`].
    pub fn missing_key_policy(mut self, policy: MissingKeyPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Registers a default value, as [`ConfigStore::set_default`] would.
    pub fn with_default(mut self, path: impl Into<String>, value: impl Into<DefaultValue>) -> Self {
        self.defaults.set(path, value);
        self
    }

    /// Builds an empty store. Call one of the `parse` methods to load a document.
    pub fn build(self) -> ConfigStore {
        ConfigStore {
            snapshot: RwLock::new(Arc::new(Snapshot::default())),
            defaults: RwLock::new(self.defaults),
            policy: self.policy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Value;

    #[test]
    fn test_builder_defaults() {
        let store = ConfigStoreBuilder::default().build();
        assert_eq!(store.missing_key_policy(), MissingKeyPolicy::Error);
        assert!(store.default_value("anything").is_none());
    }

    #[test]
    fn test_builder_registers_defaults() {
        let store = ConfigStore::builder()
            .missing_key_policy(MissingKeyPolicy::ZeroValue)
            .with_default("a.b", "x")
            .build();

        assert_eq!(store.missing_key_policy(), MissingKeyPolicy::ZeroValue);
        assert_eq!(store.default_value("a.b"), Some(Value::String("x".into())));
    }
}
