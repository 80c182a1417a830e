//! LLM-based summarizer

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::llm::{ChatRequest, LlmProvider};
use crate::domain::Summarizer;

/// Summarizer backed by a chat model; failures yield an empty summary
#[derive(Debug)]
pub struct LlmSummarizer {
    provider: Arc<dyn LlmProvider>,
    model: String,
}

impl LlmSummarizer {
    pub fn new(provider: Arc<dyn LlmProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }
}

#[async_trait]
impl Summarizer for LlmSummarizer {
    async fn summarize(&self, text: &str) -> String {
        let request = ChatRequest::prompt(format!("Summarize the following content: {}", text));

        match self.provider.complete(&self.model, &request).await {
            Ok(reply) => {
                let summary = reply.text.trim().to_string();
                debug!(input_chars = text.len(), summary_chars = summary.len(), "Summarized content");
                summary
            }
            Err(e) => {
                warn!(
                    provider = self.provider.provider_name(),
                    error = %e,
                    "Summarization failed"
                );
                String::new()
            }
        }
    }
}
