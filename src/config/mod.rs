//! JSON-with-comments configuration: parsing, path lookups and defaults.

mod builder;
mod defaults;
mod error;
mod file;
mod flatten;
mod resolve;
mod store;
mod strip;
mod value;

pub use builder::{ConfigStoreBuilder, MissingKeyPolicy};
pub use defaults::DefaultValue;
pub use error::ConfigError;
pub use store::ConfigStore;
pub use strip::strip_comments;
pub use value::{Number, Value};
