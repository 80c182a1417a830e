//! Query and cache statistics handlers

use axum::extract::State;
use tracing::{error, info};
use uuid::Uuid;

use crate::api::middleware::truncate_for_log;
use crate::api::state::AppState;
use crate::api::types::{ApiError, CacheStatsResponse, Json, QueryRequest, QueryResponse};

/// POST /query
pub async fn answer_query(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<QueryResponse>, ApiError> {
    let request_id = Uuid::new_v4().to_string();

    info!(
        request_id = %request_id,
        query = %truncate_for_log(&request.text, 200),
        "Processing query"
    );

    let answer = state
        .answer_service
        .answer(&request.text)
        .await
        .map_err(|e| {
            error!(request_id = %request_id, error = %e, "Query failed");
            ApiError::from(e)
        })?;

    info!(
        request_id = %request_id,
        source = answer.source.as_str(),
        "Query answered"
    );

    Ok(Json(QueryResponse::from(answer)))
}

/// GET /cache/stats
pub async fn cache_stats(State(state): State<AppState>) -> Json<CacheStatsResponse> {
    Json(CacheStatsResponse::from(state.answer_service.cache_stats().await))
}
