//! In-memory exact store using moka

use async_trait::async_trait;
use moka::future::Cache as MokaCache;

use crate::domain::{DomainError, ExactStore};

/// Unbounded in-process store without expiry, for tests and offline runs
#[derive(Debug, Clone)]
pub struct InMemoryExactStore {
    entries: MokaCache<String, String>,
}

impl InMemoryExactStore {
    pub fn new() -> Self {
        Self {
            entries: MokaCache::builder().build(),
        }
    }

    /// Number of stored entries
    pub fn entry_count(&self) -> u64 {
        self.entries.entry_count()
    }
}

impl Default for InMemoryExactStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExactStore for InMemoryExactStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.entries.get(key).await)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        self.entries.insert(key.to_string(), value.to_string()).await;
        Ok(())
    }

    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "in_memory"
    }
}
