//! Embedding provider domain models and traits

mod embedder;
mod provider;
mod request;
mod response;
mod vector;

pub use embedder::Embedder;
pub use provider::EmbeddingProvider;
pub use request::EmbeddingRequest;
pub use response::{Embedding, EmbeddingResponse};
pub use vector::{inner_product, l2_norm, normalize_l2};

#[cfg(test)]
pub use provider::mock::MockEmbeddingProvider;
