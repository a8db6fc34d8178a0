//! Error types for manifest loading.

use chart_gauge_core::GaugeError;
use std::path::PathBuf;
use thiserror::Error;

/// Error type for manifest loading and validation.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// YAML syntax or shape error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
    /// JSON syntax or shape error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// File could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
    /// The manifest lists no gauges
    #[error("manifest contains no gauges")]
    Empty,
    /// Two gauges share an id
    #[error("duplicate gauge id '{0}'")]
    DuplicateId(String),
    /// No gauge with the requested id
    #[error("no gauge with id '{0}'")]
    UnknownId(String),
    /// A gauge configuration failed validation
    #[error("gauge '{id}': {source}")]
    Invalid {
        /// Gauge id (or positional name)
        id: String,
        /// Validation failure
        #[source]
        source: GaugeError,
    },
}

/// Result alias for manifest operations.
pub type Result<T> = std::result::Result<T, ManifestError>;
