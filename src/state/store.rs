//! Newest-ID store implementation
//!
//! Provides file-based persistence with atomic writes.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where the newest ID is kept unless configured otherwise
pub const DEFAULT_NEWEST_ID_FILE: &str = "./newest_id.txt";

/// Text file holding the newest ID seen by the last session
#[derive(Debug, Clone)]
pub struct NewestIdStore {
    /// Path to the ID file
    path: PathBuf,
}

impl Default for NewestIdStore {
    fn default() -> Self {
        Self::new(DEFAULT_NEWEST_ID_FILE)
    }
}

impl NewestIdStore {
    /// Create a store backed by the given file
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored ID; a missing, blank or `0` file yields `None`
    pub async fn load(&self) -> Result<Option<String>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(Error::State {
                    message: format!("Failed to read {}: {e}", self.path.display()),
                })
            }
        };

        let id = contents.trim();
        if id.is_empty() || id == "0" {
            return Ok(None);
        }
        debug!("Loaded newest ID {} from {}", id, self.path.display());
        Ok(Some(id.to_string()))
    }

    /// Store an ID
    pub async fn save(&self, newest_id: &str) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| Error::State {
                    message: format!("Failed to create {}: {e}", parent.display()),
                })?;
        }

        // Write to temp file first, then rename for atomicity
        let temp_path = self.path.with_extension("tmp");
        tokio::fs::write(&temp_path, newest_id)
            .await
            .map_err(|e| Error::State {
                message: format!("Failed to write newest ID file: {e}"),
            })?;

        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| Error::State {
                message: format!("Failed to rename newest ID file: {e}"),
            })?;

        debug!("Saved newest ID {} to {}", newest_id, self.path.display());
        Ok(())
    }

    /// Remove the stored ID
    pub async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::State {
                message: format!("Failed to remove {}: {e}", self.path.display()),
            }),
        }
    }
}
