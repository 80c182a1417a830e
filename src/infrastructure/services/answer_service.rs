//! Answer orchestration: classify, consult the semantic cache, research on a miss

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::SemanticQueryCache;
use crate::domain::semantic_cache::SemanticCacheStats;
use crate::domain::{
    Answer, DomainError, NormalizedQuery, QueryClassifier, Researcher, Verdict,
};
use crate::infrastructure::observability::{record_answer, record_research};

/// Trait for answer service operations
#[async_trait]
pub trait AnswerServiceTrait: Send + Sync + std::fmt::Debug {
    /// Answer a raw query
    async fn answer(&self, raw_query: &str) -> Result<Answer, DomainError>;

    /// Semantic cache statistics
    async fn cache_stats(&self) -> SemanticCacheStats;

    /// Check the exact store is reachable
    async fn check_ready(&self) -> Result<(), DomainError>;
}

/// Gates queries through the classifier and serves them from the semantic
/// cache, falling back to live research
#[derive(Debug)]
pub struct AnswerService {
    classifier: Arc<dyn QueryClassifier>,
    cache: Arc<SemanticQueryCache>,
    researcher: Arc<dyn Researcher>,
}

impl AnswerService {
    pub fn new(
        classifier: Arc<dyn QueryClassifier>,
        cache: Arc<SemanticQueryCache>,
        researcher: Arc<dyn Researcher>,
    ) -> Self {
        Self {
            classifier,
            cache,
            researcher,
        }
    }

    pub fn cache(&self) -> &Arc<SemanticQueryCache> {
        &self.cache
    }

    /// Answer a raw query
    ///
    /// Invalid queries, and queries the classifier could not judge, get the
    /// fixed rejection message and touch neither the cache nor the
    /// researcher. Exact store and index persistence failures propagate.
    pub async fn answer(&self, raw_query: &str) -> Result<Answer, DomainError> {
        let query = NormalizedQuery::new(raw_query);

        let answer = self.answer_normalized(&query).await?;
        record_answer(answer.source.as_str());

        Ok(answer)
    }

    async fn answer_normalized(&self, query: &NormalizedQuery) -> Result<Answer, DomainError> {
        if query.is_empty() {
            debug!("Rejecting empty query");
            return Ok(Answer::rejected());
        }

        match self.classifier.classify(query).await {
            Ok(Verdict::Valid) => {}
            Ok(Verdict::Invalid) => {
                info!(query = %query, "Query classified as invalid");
                return Ok(Answer::rejected());
            }
            Err(e) => {
                warn!(query = %query, error = %e, "Classifier failed; rejecting query");
                return Ok(Answer::rejected());
            }
        }

        if let Some(hit) = self.cache.lookup(query).await? {
            if !hit.result.is_empty() {
                info!(
                    query = %query,
                    matched = %hit.matched_query,
                    similarity = hit.similarity,
                    "Answered from semantic cache"
                );
                return Ok(Answer::cached(hit.result, hit.similarity));
            }

            debug!(matched = %hit.matched_query, "Cached result is empty; researching again");
        }

        let started = Instant::now();
        let research = self.researcher.research(query).await;
        let kind = research.kind();
        record_research(kind, started.elapsed());

        let text = research.into_text();
        self.cache.insert(query, &text).await?;

        info!(
            query = %query,
            outcome = kind,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Answered from live research"
        );

        Ok(Answer::fresh(text))
    }
}

#[async_trait]
impl AnswerServiceTrait for AnswerService {
    async fn answer(&self, raw_query: &str) -> Result<Answer, DomainError> {
        AnswerService::answer(self, raw_query).await
    }

    async fn cache_stats(&self) -> SemanticCacheStats {
        self.cache.stats().await
    }

    async fn check_ready(&self) -> Result<(), DomainError> {
        self.cache.exact_store().ping().await
    }
}
