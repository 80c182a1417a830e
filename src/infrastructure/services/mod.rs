//! Infrastructure services

mod answer_service;
mod semantic_cache_service;

pub use answer_service::{AnswerService, AnswerServiceTrait};
pub use semantic_cache_service::SemanticQueryCache;

#[cfg(test)]
pub use answer_service::mock::MockAnswerService;
