//! Local artifact storage
//!
//! Job rows only carry a bare filename for their output. This module is the
//! boundary that turns such a name into a file under one fixed directory, and
//! it refuses anything that could step outside that directory.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, instrument};

pub mod config;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Invalid file name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A file that exists under the storage root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub filename: String,
    pub path: PathBuf,
    pub size: u64,
}

#[derive(Debug, Clone)]
pub struct Storage {
    root: Arc<PathBuf>,
}

impl Storage {
    pub fn new(config: config::StorageConfig) -> Self {
        debug!(root = %config.root.display(), "Storage rooted");
        Self {
            root: Arc::new(config.root),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a bare filename to a path under the root.
    ///
    /// Rejects empty names, `.`/`..`, path separators, absolute paths and NUL.
    pub fn resolve(&self, filename: &str) -> Result<PathBuf, StorageError> {
        let invalid = |reason| StorageError::InvalidName {
            name: filename.to_string(),
            reason,
        };

        if filename.trim().is_empty() {
            return Err(invalid("name is empty"));
        }
        if filename.contains('\0') {
            return Err(invalid("name contains a NUL byte"));
        }
        if filename.contains('/') || filename.contains('\\') {
            return Err(invalid("name contains a path separator"));
        }

        let mut components = Path::new(filename).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(self.root.join(filename)),
            _ => Err(invalid("name must be a plain file name")),
        }
    }

    /// Look up a file, failing with `NotFound` unless it is a regular file.
    #[instrument(skip(self))]
    pub async fn stat(&self, filename: &str) -> Result<StoredFile, StorageError> {
        let path = self.resolve(filename)?;

        let metadata = match tokio::fs::metadata(&path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::NotFound(filename.to_string()))
            },
            Err(e) => return Err(e.into()),
        };

        if !metadata.is_file() {
            return Err(StorageError::NotFound(filename.to_string()));
        }

        Ok(StoredFile {
            filename: filename.to_string(),
            path,
            size: metadata.len(),
        })
    }

    pub async fn exists(&self, filename: &str) -> Result<bool, StorageError> {
        match self.stat(filename).await {
            Ok(_) => Ok(true),
            Err(StorageError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    pub async fn open(&self, file: &StoredFile) -> Result<tokio::fs::File, StorageError> {
        Ok(tokio::fs::File::open(&file.path).await?)
    }
}
