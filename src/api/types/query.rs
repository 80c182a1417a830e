//! Query endpoint payloads

use serde::{Deserialize, Serialize};

use crate::domain::{Answer, SemanticCacheStats};

/// Body of `POST /query`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    pub text: String,
}

/// Successful answer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    pub answer: String,
}

impl From<Answer> for QueryResponse {
    fn from(answer: Answer) -> Self {
        Self {
            answer: answer.text,
        }
    }
}

/// Body of `GET /cache/stats`
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatsResponse {
    #[serde(flatten)]
    pub stats: SemanticCacheStats,
    pub hit_rate: f32,
}

impl From<SemanticCacheStats> for CacheStatsResponse {
    fn from(stats: SemanticCacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_response_drops_source() {
        let response = QueryResponse::from(Answer::cached("Paris", 0.93));
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json, serde_json::json!({ "answer": "Paris" }));
    }

    #[test]
    fn test_cache_stats_response_flattens() {
        let stats = SemanticCacheStats {
            total_entries: 3,
            dimension: Some(384),
            hits: 3,
            misses: 1,
            inserts: 1,
            dangling_keys: 0,
        };

        let json = serde_json::to_value(CacheStatsResponse::from(stats)).unwrap();
        assert_eq!(json["total_entries"], 3);
        assert_eq!(json["dimension"], 384);
        assert_eq!(json["hit_rate"], 0.75);
    }
}
