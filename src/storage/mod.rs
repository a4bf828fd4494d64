//! Storage layer
//!
//! Flat JSON dumps of run output. Each dump fully replaces its file.

/// File storage module
pub mod files;

use thiserror::Error;

/// Storage result type
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors raised while writing or reading dumps
#[derive(Error, Debug)]
pub enum StorageError {
    /// IO errors
    #[error("File storage error: {context}: {source}")]
    Io {
        /// What was being done
        context: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StorageError {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        StorageError::Io {
            context: context.into(),
            source,
        }
    }
}

pub use files::LocalStorage;
