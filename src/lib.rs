//! Semantic Query Cache
//!
//! Answers web-search style questions by classifying the query, serving a
//! semantically similar previous answer when one exists, and otherwise
//! researching the web and caching the summary.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use api::state::AppState;
use domain::{DomainError, LlmProvider};
use infrastructure::{
    classifier::LlmQueryClassifier,
    embedding::{EmbeddingProviderConfig, EmbeddingProviderFactory},
    exact_store::ExactStoreFactory,
    http_client::HttpClient,
    llm::OpenAiProvider,
    research::{LlmSummarizer, WebResearcher},
    semantic_cache::FileIndexStore,
    services::{AnswerService, SemanticQueryCache},
};
use tracing::{info, warn};

/// Wire up the answer pipeline from configuration
///
/// Opens the persisted index, connects the exact store and reports any
/// indexed queries whose results were lost.
pub async fn build_answer_service(config: &AppConfig) -> anyhow::Result<Arc<AnswerService>> {
    let api_key = config.llm.resolved_api_key();
    let cache = Arc::new(create_semantic_cache(config, api_key.clone()).await?);

    match cache.reconcile().await {
        Ok(0) => {}
        Ok(dangling) => warn!(dangling, "Semantic index references missing results"),
        Err(e) => warn!(error = %e, "Could not reconcile semantic index with exact store"),
    }

    let llm = create_llm_provider(config, api_key)?;
    let classifier = Arc::new(LlmQueryClassifier::new(llm.clone(), &config.llm.model));
    let summarizer = Arc::new(LlmSummarizer::new(llm, &config.llm.model));

    let research_client = HttpClient::with_user_agent(
        Duration::from_secs(config.research.timeout_secs),
        &config.research.user_agent,
    )?;
    let researcher = Arc::new(WebResearcher::new(
        research_client,
        summarizer,
        config.research.clone(),
    ));

    info!(
        model = %config.llm.model,
        embedding_model = %config.cache.embedding_model,
        entries = cache.len().await,
        "Answer service ready"
    );

    Ok(Arc::new(AnswerService::new(classifier, cache, researcher)))
}

/// Create application state for the HTTP server
pub fn create_app_state(service: Arc<AnswerService>) -> AppState {
    AppState::new(service)
}

async fn create_semantic_cache(
    config: &AppConfig,
    api_key: Option<String>,
) -> anyhow::Result<SemanticQueryCache> {
    let cache_config = config.cache.semantic_cache_config();

    let embedding_config = EmbeddingProviderConfig::new(&cache_config.embedding_model)
        .with_api_key(api_key)
        .with_base_url(&config.llm.base_url)
        .with_timeout(Duration::from_secs(config.llm.timeout_secs));
    let embedder = EmbeddingProviderFactory::new().create_embedder(&embedding_config)?;

    let exact_store = ExactStoreFactory::new()
        .create(&config.cache.exact_store_config())
        .await?;
    info!(backend = exact_store.backend_name(), "Exact store connected");

    let index_store = Arc::new(FileIndexStore::new(&cache_config.index_path));

    let cache = SemanticQueryCache::open(embedder, exact_store, index_store, cache_config).await?;
    Ok(cache)
}

fn create_llm_provider(
    config: &AppConfig,
    api_key: Option<String>,
) -> anyhow::Result<Arc<dyn LlmProvider>> {
    let api_key = api_key.ok_or_else(|| {
        DomainError::configuration("llm.api_key or OPENAI_API_KEY must be set")
    })?;
    let client = HttpClient::with_timeout(Duration::from_secs(config.llm.timeout_secs))?;

    Ok(Arc::new(OpenAiProvider::with_base_url(
        client,
        api_key,
        &config.llm.base_url,
    )))
}
