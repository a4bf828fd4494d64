//! Local file system storage implementation

use crate::storage::{Result, StorageError};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Indentation of every dump
const INDENT: &[u8] = b"    ";

/// Local file storage rooted at one output directory
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    /// Create a new local storage instance, creating the directory if needed
    pub async fn new(base_path: impl AsRef<Path>) -> Result<Self> {
        let path = base_path.as_ref().to_path_buf();

        if !path.exists() {
            fs::create_dir_all(&path).await.map_err(|e| {
                StorageError::io(
                    format!("Failed to create storage directory {}", path.display()),
                    e,
                )
            })?;
        }

        debug!("Local file storage initialized at: {}", path.display());
        Ok(Self { base_path: path })
    }

    /// Directory the dumps are written to
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Writes `value` as indented JSON, replacing any existing file
    pub async fn write_json<T>(&self, filename: &str, value: &T) -> Result<PathBuf>
    where
        T: Serialize + ?Sized,
    {
        let file_path = self.base_path.join(filename);
        let content = to_pretty_json(value)?;

        fs::write(&file_path, &content).await.map_err(|e| {
            StorageError::io(format!("Failed to write {}", file_path.display()), e)
        })?;

        info!(
            "Saved {} bytes to {}",
            content.len(),
            file_path.display()
        );
        Ok(file_path)
    }

    /// Reads a dump back
    pub async fn read_json<T: DeserializeOwned>(&self, filename: &str) -> Result<T> {
        let file_path = self.base_path.join(filename);
        let content = fs::read(&file_path).await.map_err(|e| {
            StorageError::io(format!("Failed to read {}", file_path.display()), e)
        })?;
        Ok(serde_json::from_slice(&content)?)
    }
}

/// Serializes with four-space indentation
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(INDENT));
    value.serialize(&mut serializer)?;
    Ok(buffer)
}
