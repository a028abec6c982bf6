use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Directory output artifacts are served from, relative to the working directory.
pub const DEFAULT_DOWNLOAD_DIR: &str = "data/responses";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub root: PathBuf,
}

impl StorageConfig {
    pub fn from_env() -> Self {
        Self {
            root: env::var("JOBVIEW_DOWNLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_DOWNLOAD_DIR)),
        }
    }

    pub fn rooted_at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::rooted_at(DEFAULT_DOWNLOAD_DIR)
    }
}
