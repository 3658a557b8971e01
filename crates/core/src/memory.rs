//! Memory trait — the single persisted session summary.
//!
//! Scout keeps exactly one free-text blob between sessions: a condensed
//! summary of past conversations. It is read at the start of every agent
//! turn and overwritten once when a session ends. There is no history and
//! no search; the last write wins.

use crate::error::MemoryError;
use async_trait::async_trait;

/// The core MemoryStore trait.
///
/// Implementations: file-backed, in-memory (for testing).
#[async_trait]
pub trait MemoryStore: Send + Sync {
    /// The store name (e.g., "file", "in_memory").
    fn name(&self) -> &str;

    /// Load the stored summary.
    ///
    /// Returns an empty string if nothing has been saved yet; absence of
    /// memory is not an error.
    async fn load(&self) -> std::result::Result<String, MemoryError>;

    /// Overwrite the stored summary.
    async fn save(&self, summary: &str) -> std::result::Result<(), MemoryError>;

    /// Forget the stored summary.
    async fn clear(&self) -> std::result::Result<(), MemoryError> {
        self.save("").await
    }
}
