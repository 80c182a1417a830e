//! Semantic cache configuration

use serde::{Deserialize, Serialize};

/// Configuration for the semantic query cache
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemanticCacheConfig {
    /// Minimum cosine similarity for a nearest neighbor to count as a hit
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f32,

    /// Embedding model; selects the vector dimension
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// Path of the persisted vector artifact; keys live next to it
    #[serde(default = "default_index_path")]
    pub index_path: String,
}

fn default_similarity_threshold() -> f32 {
    0.75
}

fn default_embedding_model() -> String {
    "hashing-384".to_string()
}

fn default_index_path() -> String {
    "vector.index".to_string()
}

impl Default for SemanticCacheConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: default_similarity_threshold(),
            embedding_model: default_embedding_model(),
            index_path: default_index_path(),
        }
    }
}

impl SemanticCacheConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the similarity threshold, clamped to [0, 1]
    pub fn with_similarity_threshold(mut self, threshold: f32) -> Self {
        self.similarity_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    pub fn with_embedding_model(mut self, model: impl Into<String>) -> Self {
        self.embedding_model = model.into();
        self
    }

    pub fn with_index_path(mut self, path: impl Into<String>) -> Self {
        self.index_path = path.into();
        self
    }

    /// Path of the key list artifact
    pub fn keys_path(&self) -> String {
        format!("{}.keys", self.index_path)
    }
}
