use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Read(#[source] std::io::Error),

    #[error("failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config root must be an object, found {found}")]
    NotAnObjectRoot { found: &'static str },

    #[error("no such key '{}'{}", .segment, in_prefix(.prefix))]
    NoSuchKey { prefix: String, segment: String },

    #[error("'{prefix}' is not an object")]
    NotAnObject { prefix: String },

    #[error("'{path}' is an object, use get_map to read it")]
    NotALeaf { path: String },

    #[error("'{literal}' is not a {expected}")]
    TypeMismatch {
        literal: String,
        expected: &'static str,
    },

    #[error("cannot parse number '{literal}' as {kind}")]
    InvalidNumber { literal: String, kind: &'static str },

    #[error("cannot deserialize '{path}': {source}")]
    Deserialize {
        path: String,
        source: serde_json::Error,
    },
}

fn in_prefix(prefix: &str) -> String {
    if prefix.is_empty() {
        String::new()
    } else {
        format!(" in '{prefix}'")
    }
}

impl ConfigError {
    /// Returns `true` for failures caused by a path that resolves to nothing.
    pub fn is_missing(&self) -> bool {
        matches!(
            self,
            ConfigError::NoSuchKey { .. } | ConfigError::NotAnObject { .. }
        )
    }
}
