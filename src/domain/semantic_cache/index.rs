//! Flat (exact) inner-product vector index

use std::cmp::Ordering;

use crate::domain::embedding::inner_product;
use crate::domain::DomainError;

/// A ranked search result
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchHit {
    /// Position of the matching vector in the index
    pub position: usize,
    /// Inner product with the query; cosine similarity for unit vectors
    pub similarity: f32,
}

/// Append-only collection of unit vectors searched exhaustively
///
/// The dimension is fixed by the first vector (or at construction) and never
/// changes afterwards.
#[derive(Debug, Clone, Default)]
pub struct FlatIndex {
    dimension: Option<usize>,
    vectors: Vec<Vec<f32>>,
}

impl FlatIndex {
    /// Create an empty index, optionally with a known dimension
    pub fn new(dimension: Option<usize>) -> Self {
        Self {
            dimension,
            vectors: Vec::new(),
        }
    }

    /// Rebuild an index from persisted vectors, checking they agree on dimension
    pub fn from_vectors(
        dimension: Option<usize>,
        vectors: Vec<Vec<f32>>,
    ) -> Result<Self, DomainError> {
        let mut index = Self::new(dimension);
        index.vectors.reserve(vectors.len());

        for vector in vectors {
            index.insert(vector)?;
        }

        Ok(index)
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn dimension(&self) -> Option<usize> {
        self.dimension
    }

    pub fn vectors(&self) -> &[Vec<f32>] {
        &self.vectors
    }

    /// Append a vector, returning its position
    pub fn insert(&mut self, vector: Vec<f32>) -> Result<usize, DomainError> {
        self.check_dimension(vector.len())?;

        if self.dimension.is_none() {
            self.dimension = Some(vector.len());
        }

        self.vectors.push(vector);
        Ok(self.vectors.len() - 1)
    }

    /// Return up to `k` hits ranked by descending similarity
    ///
    /// Ties keep the lower position first. An empty index yields no hits.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchHit>, DomainError> {
        if self.vectors.is_empty() || k == 0 {
            return Ok(Vec::new());
        }

        self.check_dimension(query.len())?;

        let mut hits: Vec<SearchHit> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(position, vector)| SearchHit {
                position,
                similarity: inner_product(query, vector),
            })
            .collect();

        hits.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(Ordering::Equal)
                .then(a.position.cmp(&b.position))
        });
        hits.truncate(k);

        Ok(hits)
    }

    /// The single nearest neighbor, if any
    pub fn nearest(&self, query: &[f32]) -> Result<Option<SearchHit>, DomainError> {
        Ok(self.search(query, 1)?.into_iter().next())
    }

    fn check_dimension(&self, len: usize) -> Result<(), DomainError> {
        match self.dimension {
            Some(dimension) if dimension != len => Err(DomainError::validation(format!(
                "Vector dimension {} does not match index dimension {}",
                len, dimension
            ))),
            _ => Ok(()),
        }
    }
}
