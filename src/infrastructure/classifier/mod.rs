//! Query classifier implementations

mod llm;

pub use llm::LlmQueryClassifier;
