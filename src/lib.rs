pub mod config;

pub use config::{
    strip_comments, ConfigError, ConfigStore, ConfigStoreBuilder, DefaultValue, MissingKeyPolicy,
    Number, Value,
};
