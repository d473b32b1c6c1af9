//! Error types for configuration resolution.

use std::path::PathBuf;
use thiserror::Error;

/// Failure while loading a single configuration document.
///
/// Tier resolution downgrades these to diagnostics and falls through to the
/// next tier; they surface as hard errors only when a caller asks for one
/// specific file (e.g. `rabital-config theme <name>` on an unreadable file).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid configuration shape in {path}: {source}")]
    Shape {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ConfigError {
    /// The file the error refers to.
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Shape { path, .. } => path,
        }
    }
}

/// Result alias for document loading.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
