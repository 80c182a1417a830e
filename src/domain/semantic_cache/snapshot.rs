//! Persisted form of the vector index and its key list

use std::fmt::Debug;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::FlatIndex;
use crate::domain::{DomainError, NormalizedQuery};

/// Vectors and keys saved and loaded together
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexSnapshot {
    pub dimension: Option<usize>,
    pub vectors: Vec<Vec<f32>>,
    pub keys: Vec<NormalizedQuery>,
}

impl IndexSnapshot {
    pub fn new(index: &FlatIndex, keys: &[NormalizedQuery]) -> Self {
        Self {
            dimension: index.dimension(),
            vectors: index.vectors().to_vec(),
            keys: keys.to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Split into an index and key list, refusing misaligned artifacts
    pub fn into_parts(self) -> Result<(FlatIndex, Vec<NormalizedQuery>), DomainError> {
        if self.vectors.len() != self.keys.len() {
            return Err(DomainError::persistence(format!(
                "Index has {} vectors but {} keys",
                self.vectors.len(),
                self.keys.len()
            )));
        }

        let index = FlatIndex::from_vectors(self.dimension, self.vectors)
            .map_err(|e| DomainError::persistence(format!("Corrupt vector artifact: {}", e)))?;

        Ok((index, self.keys))
    }
}

/// Durable storage for index snapshots
#[async_trait]
pub trait IndexStore: Send + Sync + Debug {
    /// Load the last saved snapshot, or `None` if nothing was ever saved
    async fn load(&self) -> Result<Option<IndexSnapshot>, DomainError>;

    /// Replace the saved snapshot
    async fn save(&self, snapshot: &IndexSnapshot) -> Result<(), DomainError>;

    /// Human-readable location, for logs
    fn location(&self) -> String;
}
