//! File-based summary store.
//!
//! The summary is kept as a plain text file so it stays human-readable and
//! editable. Storage location: `~/.scout/memory/summary.md`

use async_trait::async_trait;
use scout_core::error::MemoryError;
use scout_core::memory::MemoryStore;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A summary store backed by a single text file.
///
/// The file is read on every [`load`](MemoryStore::load) and rewritten in
/// full on every [`save`](MemoryStore::save); nothing is cached.
#[derive(Debug, Clone)]
pub struct FileMemoryStore {
    path: PathBuf,
}

impl FileMemoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl MemoryStore for FileMemoryStore {
    fn name(&self) -> &str {
        "file"
    }

    async fn load(&self) -> Result<String, MemoryError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(summary) => {
                debug!(path = %self.path.display(), chars = summary.len(), "Memory loaded");
                Ok(summary)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read memory file");
                Err(MemoryError::Storage(format!(
                    "Failed to read memory file: {e}"
                )))
            }
        }
    }

    async fn save(&self, summary: &str) -> Result<(), MemoryError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                MemoryError::Storage(format!("Failed to create memory directory: {e}"))
            })?;
        }

        tokio::fs::write(&self.path, summary)
            .await
            .map_err(|e| MemoryError::Storage(format!("Failed to write memory file: {e}")))?;

        debug!(path = %self.path.display(), chars = summary.len(), "Memory saved");
        Ok(())
    }

    async fn clear(&self) -> Result<(), MemoryError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(MemoryError::Storage(format!(
                "Failed to remove memory file: {e}"
            ))),
        }
    }
}
