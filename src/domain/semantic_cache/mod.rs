//! Semantic cache domain models and traits
//!
//! Matches semantically similar queries through a flat vector index whose
//! positions point into a parallel key list, with results held in an exact
//! key/value store.

mod config;
mod index;
mod snapshot;
mod stats;

pub use config::SemanticCacheConfig;
pub use index::{FlatIndex, SearchHit};
pub use snapshot::{IndexSnapshot, IndexStore};
pub use stats::{CacheHit, SemanticCacheStats};

#[cfg(test)]
pub use snapshot::mock::MockIndexStore;
