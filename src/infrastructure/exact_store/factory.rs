//! Exact store factory for runtime selection

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, ExactStore};

use super::in_memory::InMemoryExactStore;
use super::redis::{RedisExactStore, RedisExactStoreConfig};

/// Supported exact store backends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExactStoreType {
    #[default]
    Redis,
    InMemory,
}

impl std::fmt::Display for ExactStoreType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExactStoreType::InMemory => write!(f, "in_memory"),
            ExactStoreType::Redis => write!(f, "redis"),
        }
    }
}

impl std::str::FromStr for ExactStoreType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "in_memory" | "inmemory" | "memory" => Ok(ExactStoreType::InMemory),
            "redis" => Ok(ExactStoreType::Redis),
            _ => Err(DomainError::configuration(format!(
                "Unknown exact store type: {}. Valid types: in_memory, redis",
                s
            ))),
        }
    }
}

/// Configuration for the exact store factory
#[derive(Debug, Clone, Default)]
pub struct ExactStoreConfig {
    pub store_type: ExactStoreType,
    /// Required for the Redis backend
    pub redis_url: Option<String>,
    pub key_prefix: Option<String>,
}

impl ExactStoreConfig {
    pub fn in_memory() -> Self {
        Self {
            store_type: ExactStoreType::InMemory,
            ..Default::default()
        }
    }

    pub fn redis(url: impl Into<String>) -> Self {
        Self {
            store_type: ExactStoreType::Redis,
            redis_url: Some(url.into()),
            ..Default::default()
        }
    }

    pub fn with_key_prefix(mut self, prefix: Option<String>) -> Self {
        self.key_prefix = prefix;
        self
    }
}

/// Factory for creating exact store instances
#[derive(Debug, Default)]
pub struct ExactStoreFactory;

impl ExactStoreFactory {
    pub fn new() -> Self {
        Self
    }

    pub async fn create(&self, config: &ExactStoreConfig) -> Result<Arc<dyn ExactStore>, DomainError> {
        match config.store_type {
            ExactStoreType::InMemory => Ok(Arc::new(InMemoryExactStore::new())),
            ExactStoreType::Redis => {
                let url = config.redis_url.clone().ok_or_else(|| {
                    DomainError::configuration("Redis URL is required for the redis exact store")
                })?;

                let mut redis_config = RedisExactStoreConfig::new(url);
                if let Some(prefix) = &config.key_prefix {
                    redis_config = redis_config.with_key_prefix(prefix.clone());
                }

                Ok(Arc::new(RedisExactStore::new(redis_config).await?))
            }
        }
    }
}
