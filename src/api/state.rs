//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::services::AnswerServiceTrait;

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub answer_service: Arc<dyn AnswerServiceTrait>,
}

impl AppState {
    pub fn new(answer_service: Arc<dyn AnswerServiceTrait>) -> Self {
        Self { answer_service }
    }
}
