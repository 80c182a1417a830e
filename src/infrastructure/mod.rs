//! Infrastructure layer - External service implementations

pub mod classifier;
pub mod embedding;
pub mod exact_store;
pub mod http_client;
pub mod llm;
pub mod logging;
pub mod observability;
pub mod research;
pub mod semantic_cache;
pub mod services;
