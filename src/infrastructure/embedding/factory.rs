//! Embedding provider selection from the configured model id

use std::sync::Arc;
use std::time::Duration;

use crate::domain::{DomainError, Embedder, EmbeddingProvider};
use crate::infrastructure::http_client::HttpClient;
use crate::infrastructure::llm::DEFAULT_OPENAI_BASE_URL;

use super::{HashingEmbeddingProvider, OpenAiEmbeddingProvider};

/// Settings needed to build an embedder
#[derive(Debug, Clone)]
pub struct EmbeddingProviderConfig {
    /// `hashing-<dim>` selects the offline provider, anything else OpenAI
    pub model: String,
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl Default for EmbeddingProviderConfig {
    fn default() -> Self {
        Self {
            model: "hashing-384".to_string(),
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            api_key: None,
            timeout: Duration::from_secs(60),
        }
    }
}

impl EmbeddingProviderConfig {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Factory for embedding providers
#[derive(Debug, Default)]
pub struct EmbeddingProviderFactory;

impl EmbeddingProviderFactory {
    pub fn new() -> Self {
        Self
    }

    /// Creates the provider serving the configured model
    pub fn create(
        &self,
        config: &EmbeddingProviderConfig,
    ) -> Result<Arc<dyn EmbeddingProvider>, DomainError> {
        let hashing = HashingEmbeddingProvider::new();
        if config.model.starts_with("hashing-") {
            if hashing.dimensions(&config.model).is_none() {
                return Err(DomainError::configuration(format!(
                    "Invalid hashing embedding model: {}",
                    config.model
                )));
            }
            return Ok(Arc::new(hashing));
        }

        let api_key = config.api_key.clone().ok_or_else(|| {
            DomainError::configuration(format!(
                "An API key is required for embedding model '{}'",
                config.model
            ))
        })?;

        let client = HttpClient::with_timeout(config.timeout)?;
        Ok(Arc::new(OpenAiEmbeddingProvider::with_base_url(
            client,
            api_key,
            &config.base_url,
        )))
    }

    /// Creates an embedder bound to the configured model
    pub fn create_embedder(&self, config: &EmbeddingProviderConfig) -> Result<Embedder, DomainError> {
        let provider = self.create(config)?;
        Ok(Embedder::new(provider, &config.model))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hashing_model_selects_offline_provider() {
        let factory = EmbeddingProviderFactory::new();
        let provider = factory.create(&EmbeddingProviderConfig::new("hashing-128")).unwrap();

        assert_eq!(provider.provider_name(), "hashing");
        assert_eq!(provider.dimensions("hashing-128"), Some(128));
    }

    #[test]
    fn test_invalid_hashing_model() {
        let factory = EmbeddingProviderFactory::new();
        let result = factory.create(&EmbeddingProviderConfig::new("hashing-x"));
        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }

    #[test]
    fn test_openai_model_requires_api_key() {
        let factory = EmbeddingProviderFactory::new();
        let result = factory.create(&EmbeddingProviderConfig::new("text-embedding-3-small"));
        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }

    #[test]
    fn test_openai_model_with_api_key() {
        let factory = EmbeddingProviderFactory::new();
        let config = EmbeddingProviderConfig::new("text-embedding-3-small")
            .with_api_key(Some("sk-test".to_string()));

        let embedder = factory.create_embedder(&config).unwrap();
        assert_eq!(embedder.model(), "text-embedding-3-small");
        assert_eq!(embedder.dimensions(), Some(1536));
    }
}
