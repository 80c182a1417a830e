//! Exact store trait definition

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::DomainError;

/// Key/value store holding one result per normalized query
///
/// Entries never expire; a second `set` for the same key overwrites.
/// Implementations must surface connectivity problems as
/// [`DomainError::Store`] instead of reporting a miss.
#[async_trait]
pub trait ExactStore: Send + Sync + Debug {
    /// Gets the result stored under a key
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Stores a result under a key
    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError>;

    /// Checks that the store is reachable
    async fn ping(&self) -> Result<(), DomainError> {
        self.get("__ping__").await.map(|_| ())
    }

    /// Store backend name, for logs and health checks
    fn backend_name(&self) -> &'static str;
}
