use crate::storage::{Storage, StorageError, StoredFile};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadFileQuery {
    pub filename: String,
}

#[derive(Debug, thiserror::Error)]
pub enum DownloadFileError {
    #[error("Filename is required and cannot be empty")]
    FilenameRequired,
    #[error("Invalid filename: {0}")]
    InvalidFilename(String),
    #[error("File not found")]
    NotFound,
    #[error("Storage error: {0}")]
    Storage(#[source] std::io::Error),
}

impl From<StorageError> for DownloadFileError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::InvalidName { reason, .. } => Self::InvalidFilename(reason.to_string()),
            StorageError::NotFound(_) => Self::NotFound,
            StorageError::Io(e) => Self::Storage(e),
        }
    }
}

impl DownloadFileQuery {
    pub fn validate(&self) -> Result<(), DownloadFileError> {
        if self.filename.trim().is_empty() {
            return Err(DownloadFileError::FilenameRequired);
        }
        Ok(())
    }
}

/// Locate the artifact; the route streams it.
#[tracing::instrument(skip(storage))]
pub async fn handle(
    storage: &Storage,
    query: DownloadFileQuery,
) -> Result<StoredFile, DownloadFileError> {
    query.validate()?;

    let file = storage.stat(&query.filename).await?;

    tracing::debug!(path = %file.path.display(), size = file.size, "Artifact located");

    Ok(file)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::config::StorageConfig;

    fn query(filename: &str) -> DownloadFileQuery {
        DownloadFileQuery {
            filename: filename.to_string(),
        }
    }

    #[test]
    fn test_validation_empty_filename() {
        assert!(matches!(
            query("").validate(),
            Err(DownloadFileError::FilenameRequired)
        ));
        assert!(matches!(
            query("   ").validate(),
            Err(DownloadFileError::FilenameRequired)
        ));
    }

    #[test]
    fn test_validation_success() {
        assert!(query("report.csv").validate().is_ok());
    }

    #[tokio::test]
    async fn test_handle_found() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("report.csv"), b"a,b\n1,2\n").unwrap();
        let storage = Storage::new(StorageConfig::rooted_at(dir.path()));

        let file = handle(&storage, query("report.csv")).await.unwrap();
        assert_eq!(file.filename, "report.csv");
        assert_eq!(file.size, 8);
    }

    #[tokio::test]
    async fn test_handle_missing() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(StorageConfig::rooted_at(dir.path()));

        assert!(matches!(
            handle(&storage, query("nope.csv")).await,
            Err(DownloadFileError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_handle_directory_is_not_a_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        let storage = Storage::new(StorageConfig::rooted_at(dir.path()));

        assert!(matches!(
            handle(&storage, query("nested")).await,
            Err(DownloadFileError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_handle_traversal_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(StorageConfig::rooted_at(dir.path()));

        assert!(matches!(
            handle(&storage, query("..")).await,
            Err(DownloadFileError::InvalidFilename(_))
        ));
        assert!(matches!(
            handle(&storage, query("../etc/passwd")).await,
            Err(DownloadFileError::InvalidFilename(_))
        ));
    }
}
