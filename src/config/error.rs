use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading widget configs or writing output.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file does not exist.
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
    /// Path could not be expanded (unknown variable, missing home directory).
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },
    /// Root of the document is not a JSON object.
    #[error("Config root must be an object, found {0}")]
    NotAnObject(&'static str),
    /// Document is not valid JSON.
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// Atomic write operation failed.
    #[error("Atomic write failed: {0}")]
    WriteFailed(String),
    /// Generic I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
