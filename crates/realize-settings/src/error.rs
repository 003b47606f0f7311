//! Error type shared by every settings operation.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for settings file operations.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing settings at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The YAML content could not be parsed.
    #[error("failed to parse settings YAML: {0}")]
    Parse(#[source] serde_yaml::Error),

    /// The value could not be serialized to YAML.
    #[error("failed to serialize settings: {0}")]
    Serialize(#[source] serde_yaml::Error),

    /// The file-descriptor limit could not be queried or applied.
    #[error("failed to apply file limit: {0}")]
    Limit(String),
}

impl SettingsError {
    /// Wraps an [`std::io::Error`] together with the path it occurred on.
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
