//! Exact store implementations

mod factory;
mod in_memory;
mod redis;

pub use factory::{ExactStoreConfig, ExactStoreFactory, ExactStoreType};
pub use in_memory::InMemoryExactStore;
pub use redis::{RedisExactStore, RedisExactStoreConfig};
