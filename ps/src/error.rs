//! Store error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing presets
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("read presets {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("write presets {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse presets {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("marshal presets: {0}")]
    Serialize(#[from] serde_yaml::Error),

    #[error("preset key already exists: {0}")]
    KeyExists(String),

    #[error("preset not found: {0}")]
    NotFound(String),
}

impl StoreError {
    /// True when the error is about the preset set itself rather than I/O
    pub fn is_user_error(&self) -> bool {
        matches!(self, StoreError::KeyExists(_) | StoreError::NotFound(_))
    }
}
