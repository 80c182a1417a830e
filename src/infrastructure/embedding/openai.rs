//! Hosted embeddings over the OpenAI HTTP API

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::embedding::{
    Embedding, EmbeddingProvider, EmbeddingRequest, EmbeddingResponse,
};
use crate::domain::DomainError;
use crate::infrastructure::http_client::HttpClientTrait;
use crate::infrastructure::llm::DEFAULT_OPENAI_BASE_URL;

/// Output widths of the hosted embedding models
const MODEL_DIMENSIONS: &[(&str, usize)] = &[
    ("text-embedding-3-small", 1536),
    ("text-embedding-3-large", 3072),
    ("text-embedding-ada-002", 1536),
];

/// Embeddings from the OpenAI `/v1/embeddings` endpoint
#[derive(Debug)]
pub struct OpenAiEmbeddingProvider<C: HttpClientTrait> {
    client: C,
    auth_header: String,
    endpoint: String,
}

impl<C: HttpClientTrait> OpenAiEmbeddingProvider<C> {
    pub fn new(client: C, api_key: impl Into<String>) -> Self {
        Self::with_base_url(client, api_key, DEFAULT_OPENAI_BASE_URL)
    }

    pub fn with_base_url(
        client: C,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into();

        Self {
            client,
            auth_header: format!("Bearer {}", api_key.into()),
            endpoint: format!("{}/v1/embeddings", base_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl<C: HttpClientTrait> EmbeddingProvider for OpenAiEmbeddingProvider<C> {
    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, DomainError> {
        let body = serde_json::json!({
            "model": request.model(),
            "input": request.inputs(),
        });
        let headers = vec![
            ("Authorization", self.auth_header.as_str()),
            ("Content-Type", "application/json"),
        ];

        let json = self.client.post_json(&self.endpoint, headers, &body).await?;
        let batch: EmbeddingBatch = serde_json::from_value(json).map_err(|e| {
            DomainError::provider("openai", format!("Failed to parse embedding response: {}", e))
        })?;

        if batch.data.len() != request.inputs().len() {
            return Err(DomainError::provider(
                "openai",
                format!(
                    "Expected {} embeddings, got {}",
                    request.inputs().len(),
                    batch.data.len()
                ),
            ));
        }

        // The API does not promise input order
        let mut embeddings: Vec<Embedding> = batch
            .data
            .into_iter()
            .map(|item| Embedding::new(item.index, item.embedding))
            .collect();
        embeddings.sort_by_key(Embedding::index);

        Ok(EmbeddingResponse::new(batch.model, embeddings))
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn default_model(&self) -> &'static str {
        "text-embedding-3-small"
    }

    fn dimensions(&self, model: &str) -> Option<usize> {
        MODEL_DIMENSIONS
            .iter()
            .find_map(|(name, dims)| (*name == model).then_some(*dims))
    }
}

#[derive(Deserialize)]
struct EmbeddingBatch {
    model: String,
    data: Vec<EmbeddingItem>,
}

#[derive(Deserialize)]
struct EmbeddingItem {
    index: usize,
    embedding: Vec<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::http_client::mock::MockHttpClient;

    const TEST_URL: &str = "https://api.openai.com/v1/embeddings";

    /// Items come back in reverse index order
    fn batch_body(count: usize, dimensions: usize) -> serde_json::Value {
        let data: Vec<serde_json::Value> = (0..count)
            .rev()
            .map(|i| {
                let embedding = vec![i as f32 + 1.0; dimensions];
                serde_json::json!({ "index": i, "embedding": embedding, "object": "embedding" })
            })
            .collect();

        serde_json::json!({
            "model": "text-embedding-3-small",
            "data": data,
            "usage": { "prompt_tokens": 10, "total_tokens": 10 }
        })
    }

    #[tokio::test]
    async fn test_embed_single_text() {
        let client = MockHttpClient::new().with_response(TEST_URL, batch_body(1, 1536));
        let provider = OpenAiEmbeddingProvider::new(client, "test-api-key");

        let request = EmbeddingRequest::single("text-embedding-3-small", "Hello world");
        let response = provider.embed(request).await.unwrap();

        assert_eq!(response.model(), "text-embedding-3-small");
        assert_eq!(response.embeddings().len(), 1);
        assert_eq!(response.embeddings()[0].dimensions(), 1536);

        let (_, body) = provider.client.requests().remove(0);
        assert_eq!(body["input"], serde_json::json!(["Hello world"]));
    }

    #[tokio::test]
    async fn test_embed_batch_ordered_by_index() {
        let client = MockHttpClient::new().with_response(TEST_URL, batch_body(3, 8));
        let provider = OpenAiEmbeddingProvider::new(client, "test-api-key");

        let request = EmbeddingRequest::batch(
            "text-embedding-3-small",
            vec!["Hello".into(), "World".into(), "Test".into()],
        );
        let response = provider.embed(request).await.unwrap();

        for (i, emb) in response.embeddings().iter().enumerate() {
            assert_eq!(emb.index(), i);
            assert_eq!(emb.vector()[0], i as f32 + 1.0);
        }
    }

    #[tokio::test]
    async fn test_embedding_count_mismatch_is_error() {
        let client = MockHttpClient::new().with_response(TEST_URL, batch_body(1, 4));
        let provider = OpenAiEmbeddingProvider::new(client, "test-api-key");

        let request = EmbeddingRequest::batch("text-embedding-3-small", vec!["a".into(), "b".into()]);
        let result = provider.embed(request).await;

        assert!(matches!(result, Err(DomainError::Provider { .. })));
    }

    #[tokio::test]
    async fn test_embed_error() {
        let client = MockHttpClient::new().with_error(TEST_URL, "Rate limit exceeded");
        let provider = OpenAiEmbeddingProvider::new(client, "test-api-key");

        let request = EmbeddingRequest::single("text-embedding-3-small", "Hello");
        assert!(provider.embed(request).await.is_err());
    }

    #[tokio::test]
    async fn test_custom_base_url() {
        let custom_url = "http://localhost:8080/v1/embeddings";
        let client = MockHttpClient::new().with_response(custom_url, batch_body(1, 4));
        let provider =
            OpenAiEmbeddingProvider::with_base_url(client, "test-key", "http://localhost:8080");

        let request = EmbeddingRequest::single("text-embedding-3-small", "Test");
        let response = provider.embed(request).await.unwrap();

        assert_eq!(response.embeddings().len(), 1);
    }

    #[test]
    fn test_provider_info() {
        let provider = OpenAiEmbeddingProvider::new(MockHttpClient::new(), "test-key");

        assert_eq!(provider.provider_name(), "openai");
        assert_eq!(provider.default_model(), "text-embedding-3-small");
        assert_eq!(provider.dimensions("text-embedding-3-small"), Some(1536));
        assert_eq!(provider.dimensions("text-embedding-3-large"), Some(3072));
        assert_eq!(provider.dimensions("unknown-model"), None);
    }
}
