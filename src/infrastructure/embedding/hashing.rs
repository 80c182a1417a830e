//! Offline feature-hashing embedding provider

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use crate::domain::embedding::{
    Embedding, EmbeddingProvider, EmbeddingRequest, EmbeddingResponse,
};
use crate::domain::DomainError;

const MODEL_PREFIX: &str = "hashing-";
const DEFAULT_MODEL: &str = "hashing-384";

const WORD_WEIGHT: f32 = 1.0;
const TRIGRAM_WEIGHT: f32 = 0.5;

const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "can", "do", "does", "for", "from", "how",
    "i", "in", "is", "it", "me", "of", "on", "or", "tell", "that", "the", "this", "to", "was",
    "what", "whats", "when", "where", "which", "who", "why", "with",
];

/// Deterministic embeddings built by hashing words and character trigrams
/// into signed buckets
///
/// Model ids take the form `hashing-<dim>`. Inputs that share their
/// content words map to the same vector, so phrasing variants such as
/// "capital of france" and "what is the capital of france" coincide.
#[derive(Debug, Clone, Default)]
pub struct HashingEmbeddingProvider;

impl HashingEmbeddingProvider {
    pub fn new() -> Self {
        Self
    }

    fn parse_dimensions(model: &str) -> Option<usize> {
        model
            .strip_prefix(MODEL_PREFIX)
            .and_then(|dims| dims.parse::<usize>().ok())
            .filter(|dims| *dims > 0)
    }

    fn tokens(text: &str) -> Vec<String> {
        text.to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| t.chars().count() > 1 && !STOP_WORDS.contains(t))
            .map(str::to_string)
            .collect()
    }

    fn bucket(feature: &str, dimensions: usize) -> (usize, f32) {
        let digest = Sha256::digest(feature.as_bytes());

        let mut index_bytes = [0u8; 8];
        index_bytes.copy_from_slice(&digest[..8]);
        let index = (u64::from_le_bytes(index_bytes) % dimensions as u64) as usize;
        let sign = if digest[8] & 1 == 0 { 1.0 } else { -1.0 };

        (index, sign)
    }

    fn embed_text(text: &str, dimensions: usize) -> Vec<f32> {
        let mut vector = vec![0.0f32; dimensions];

        for token in Self::tokens(text) {
            let (index, sign) = Self::bucket(&format!("w:{}", token), dimensions);
            vector[index] += sign * WORD_WEIGHT;

            let chars: Vec<char> = token.chars().collect();
            for window in chars.windows(3) {
                let trigram: String = window.iter().collect();
                let (index, sign) = Self::bucket(&format!("t:{}", trigram), dimensions);
                vector[index] += sign * TRIGRAM_WEIGHT;
            }
        }

        vector
    }
}

#[async_trait]
impl EmbeddingProvider for HashingEmbeddingProvider {
    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, DomainError> {
        let dimensions = Self::parse_dimensions(request.model()).ok_or_else(|| {
            DomainError::configuration(format!(
                "Unknown hashing model '{}', expected {}<dimensions>",
                request.model(),
                MODEL_PREFIX
            ))
        })?;

        let data = request
            .inputs()
            .iter()
            .enumerate()
            .map(|(i, text)| Embedding::new(i, Self::embed_text(text, dimensions)))
            .collect();

        Ok(EmbeddingResponse::new(request.model().to_string(), data))
    }

    fn provider_name(&self) -> &'static str {
        "hashing"
    }

    fn default_model(&self) -> &'static str {
        DEFAULT_MODEL
    }

    fn dimensions(&self, model: &str) -> Option<usize> {
        Self::parse_dimensions(model)
    }
}
