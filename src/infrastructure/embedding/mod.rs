//! Embedding provider implementations

mod factory;
mod hashing;
mod openai;

pub use factory::{EmbeddingProviderConfig, EmbeddingProviderFactory};
pub use hashing::HashingEmbeddingProvider;
pub use openai::OpenAiEmbeddingProvider;
