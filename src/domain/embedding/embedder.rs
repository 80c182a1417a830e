//! Embedder: provider call followed by mandatory L2 normalization

use std::sync::Arc;

use tracing::debug;

use super::{normalize_l2, EmbeddingProvider, EmbeddingRequest};
use crate::domain::DomainError;

/// Turns text into a unit-length vector using a fixed provider and model
///
/// Normalization always happens here; provider output is never trusted to
/// be unit length.
#[derive(Debug, Clone)]
pub struct Embedder {
    provider: Arc<dyn EmbeddingProvider>,
    model: String,
}

impl Embedder {
    pub fn new(provider: Arc<dyn EmbeddingProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    /// Create an embedder using the provider's default model
    pub fn with_default_model(provider: Arc<dyn EmbeddingProvider>) -> Self {
        let model = provider.default_model();
        Self::new(provider, model)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Vector dimension for the configured model, if the provider knows it
    pub fn dimensions(&self) -> Option<usize> {
        self.provider.dimensions(&self.model)
    }

    /// Embed a single text into a unit vector
    ///
    /// Empty text yields a zero vector when the dimension is known, without
    /// calling the provider.
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>, DomainError> {
        if text.is_empty() {
            if let Some(dimensions) = self.dimensions() {
                return Ok(vec![0.0; dimensions]);
            }
        }

        let request = EmbeddingRequest::single(&self.model, text);
        let response = self.provider.embed(request).await?;

        let mut vector = response
            .into_first()
            .map(|e| e.into_vector())
            .ok_or_else(|| {
                DomainError::provider(self.provider.provider_name(), "No embedding returned")
            })?;

        normalize_l2(&mut vector);

        debug!(
            provider = self.provider.provider_name(),
            model = %self.model,
            dimensions = vector.len(),
            "Embedded text"
        );

        Ok(vector)
    }
}
