//! Domain layer - Core business logic and entities

pub mod answer;
pub mod embedding;
pub mod error;
pub mod exact_store;
pub mod llm;
pub mod query;
pub mod semantic_cache;

pub use answer::{
    Answer, AnswerSource, QueryClassifier, Research, Researcher, Summarizer, Verdict,
    REJECTION_MESSAGE,
};
pub use embedding::{Embedder, EmbeddingProvider, EmbeddingRequest, EmbeddingResponse};
pub use error::DomainError;
pub use exact_store::ExactStore;
pub use llm::{ChatReply, ChatRequest, LlmProvider};
pub use query::NormalizedQuery;
pub use semantic_cache::{
    CacheHit, FlatIndex, IndexSnapshot, IndexStore, SearchHit, SemanticCacheConfig,
    SemanticCacheStats,
};
