//! Error types for folio-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from configuration and category lookups.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Underlying I/O failure while reading configuration.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parse error on load: includes file path and line context from serde_yaml.
    #[error("failed to parse config at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The configuration file did not exist at the expected path.
    #[error("config not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// A target failed validation (duplicate name, path outside root, ...).
    #[error("invalid target '{name}': {reason}")]
    InvalidTarget { name: String, reason: String },

    /// A category code has no entry in the category table.
    #[error("category not found: '{code}'")]
    CategoryNotFound { code: String },
}
