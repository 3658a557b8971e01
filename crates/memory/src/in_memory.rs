//! In-memory store — useful for testing and ephemeral sessions.

use async_trait::async_trait;
use scout_core::error::MemoryError;
use scout_core::memory::MemoryStore;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Keeps the summary in process memory. Nothing survives a restart.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    summary: Arc<RwLock<String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `summary`.
    pub fn with_summary(summary: impl Into<String>) -> Self {
        Self {
            summary: Arc::new(RwLock::new(summary.into())),
        }
    }
}

#[async_trait]
impl MemoryStore for InMemoryStore {
    fn name(&self) -> &str {
        "in_memory"
    }

    async fn load(&self) -> Result<String, MemoryError> {
        Ok(self.summary.read().await.clone())
    }

    async fn save(&self, summary: &str) -> Result<(), MemoryError> {
        *self.summary.write().await = summary.to_string();
        Ok(())
    }
}
