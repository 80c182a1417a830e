//! LLM-based query classifier
//!
//! Asks a chat model whether the query is a legitimate web search query and
//! reads a YES/NO answer.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::llm::{ChatRequest, LlmProvider};
use crate::domain::{DomainError, NormalizedQuery, QueryClassifier, Verdict};

/// Query classifier backed by a chat model
#[derive(Debug)]
pub struct LlmQueryClassifier {
    provider: Arc<dyn LlmProvider>,
    model: String,
}

impl LlmQueryClassifier {
    pub fn new(provider: Arc<dyn LlmProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    fn build_prompt(query: &NormalizedQuery) -> String {
        format!(
            "Is this a valid web search query? Answer YES or NO.\nQuery: {}",
            query
        )
    }

    /// Valid iff the reply, trimmed and uppercased, starts with YES
    fn parse_verdict(reply: &str) -> Verdict {
        if reply.trim().to_uppercase().starts_with("YES") {
            Verdict::Valid
        } else {
            Verdict::Invalid
        }
    }
}

#[async_trait]
impl QueryClassifier for LlmQueryClassifier {
    async fn classify(&self, query: &NormalizedQuery) -> Result<Verdict, DomainError> {
        let request = ChatRequest::prompt(Self::build_prompt(query)).with_temperature(0.0);

        let reply = self.provider.complete(&self.model, &request).await?;
        let verdict = Self::parse_verdict(&reply.text);

        debug!(
            query = %query,
            reply = %reply.text,
            verdict = ?verdict,
            "Classified query"
        );

        Ok(verdict)
    }
}
