use std::path::PathBuf;

use thiserror::Error;

/// Error type for loading and validating API snapshots.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Failed to read snapshot at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Snapshot at {path} is not valid UTF-8: {source}")]
    InvalidUtf8 {
        path: PathBuf,
        #[source]
        source: std::str::Utf8Error,
    },

    #[error("Invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid snapshot YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Snapshot files are selected by extension (.json, .yaml, .yml).
    #[error("Unsupported snapshot format for {0}; expected .json, .yaml or .yml")]
    UnsupportedFormat(PathBuf),

    #[error("Function with empty name in package {package}")]
    EmptyName { package: String },

    #[error("Function {function} declared more than once")]
    DuplicateFunction { function: String },

    /// Parameter and result names must be identifiers; they are spliced into
    /// identity strings verbatim.
    #[error("Function {function}: invalid parameter or result name {name:?}")]
    InvalidName { function: String, name: String },

    /// Only the last parameter of a function may be variadic.
    #[error("Function {function}: variadic parameter at position {position} is not last")]
    VariadicNotLast { function: String, position: usize },

    #[error("Function {function}: variadic parameter has no element type")]
    EmptyVariadicElement { function: String },
}

/// Convenience result type for snapshot operations.
pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Error type for audit configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    Json(#[from] serde_json::Error),
}
