use serde::Deserialize;

use crate::domain::semantic_cache::SemanticCacheConfig;
use crate::infrastructure::exact_store::{ExactStoreConfig, ExactStoreType};
use crate::infrastructure::observability::MetricsConfig;
use crate::infrastructure::research::WebResearcherConfig;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub llm: LlmSettings,
    #[serde(default)]
    pub research: WebResearcherConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Semantic cache and exact store settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    pub embedding_model: String,
    pub similarity_threshold: f32,
    pub index_path: String,
    pub exact_store: ExactStoreType,
    pub redis_url: String,
    pub key_prefix: Option<String>,
}

/// Chat model used for classification and summarization
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    pub base_url: String,
    /// Falls back to `OPENAI_API_KEY` when unset
    pub api_key: Option<String>,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        let semantic = SemanticCacheConfig::default();

        Self {
            embedding_model: semantic.embedding_model,
            similarity_threshold: semantic.similarity_threshold,
            index_path: semantic.index_path,
            exact_store: ExactStoreType::default(),
            redis_url: "redis://localhost:6379".to_string(),
            key_prefix: None,
        }
    }
}

impl CacheSettings {
    pub fn semantic_cache_config(&self) -> SemanticCacheConfig {
        SemanticCacheConfig::new()
            .with_similarity_threshold(self.similarity_threshold)
            .with_embedding_model(&self.embedding_model)
            .with_index_path(&self.index_path)
    }

    pub fn exact_store_config(&self) -> ExactStoreConfig {
        let config = match self.exact_store {
            ExactStoreType::Redis => ExactStoreConfig::redis(&self.redis_url),
            ExactStoreType::InMemory => ExactStoreConfig::in_memory(),
        };

        config.with_key_prefix(self.key_prefix.clone())
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".to_string(),
            api_key: None,
            model: "gpt-4o-mini".to_string(),
            timeout_secs: 60,
        }
    }
}

impl LlmSettings {
    /// Configured key, or `OPENAI_API_KEY` from the environment
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|key| !key.is_empty())
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .filter(|key| !key.is_empty())
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.server.port, 8000);
        assert_eq!(config.cache.embedding_model, "hashing-384");
        assert!((config.cache.similarity_threshold - 0.75).abs() < f32::EPSILON);
        assert_eq!(config.cache.exact_store, ExactStoreType::Redis);
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.research.max_results, 5);
        assert!(config.metrics.enabled);
    }

    #[test]
    fn test_partial_sections_fill_defaults() {
        let config: AppConfig = serde_json::from_value(serde_json::json!({
            "cache": { "exact_store": "in_memory", "similarity_threshold": 1.5 },
            "research": { "max_results": 3 }
        }))
        .unwrap();

        assert_eq!(config.cache.exact_store, ExactStoreType::InMemory);
        assert_eq!(config.cache.index_path, "vector.index");
        assert_eq!(config.research.max_results, 3);
        assert_eq!(config.research.user_agent, "Mozilla/5.0");

        // Clamped when turned into the cache config
        let semantic = config.cache.semantic_cache_config();
        assert!((semantic.similarity_threshold - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_exact_store_config_carries_prefix() {
        let settings = CacheSettings {
            key_prefix: Some("sqc".to_string()),
            ..Default::default()
        };

        let store = settings.exact_store_config();
        assert_eq!(store.store_type, ExactStoreType::Redis);
        assert_eq!(store.redis_url.as_deref(), Some("redis://localhost:6379"));
        assert_eq!(store.key_prefix.as_deref(), Some("sqc"));
    }

    #[test]
    fn test_configured_api_key_wins() {
        let settings = LlmSettings {
            api_key: Some("sk-config".to_string()),
            ..Default::default()
        };

        assert_eq!(settings.resolved_api_key().as_deref(), Some("sk-config"));
    }
}
