//! Lookup results and statistics

use serde::{Deserialize, Serialize};

use crate::domain::NormalizedQuery;

/// A successful semantic lookup
#[derive(Debug, Clone, PartialEq)]
pub struct CacheHit {
    /// Stored result text
    pub result: String,
    /// The previously answered query the lookup matched
    pub matched_query: NormalizedQuery,
    /// Similarity between the lookup query and the matched query
    pub similarity: f32,
}

/// Statistics for the semantic cache
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SemanticCacheStats {
    /// Number of indexed queries (duplicates included)
    pub total_entries: usize,
    /// Vector dimension, once known
    pub dimension: Option<usize>,
    /// Total cache hits
    pub hits: u64,
    /// Total cache misses
    pub misses: u64,
    /// Successful inserts since startup
    pub inserts: u64,
    /// Indexed keys found without a stored result
    pub dangling_keys: u64,
}

impl SemanticCacheStats {
    /// Calculate hit rate
    pub fn hit_rate(&self) -> f32 {
        let total = self.hits + self.misses;

        if total == 0 {
            return 0.0;
        }

        self.hits as f32 / total as f32
    }
}
