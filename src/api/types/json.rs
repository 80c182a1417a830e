//! JSON extractor whose rejections use the API error body

use axum::{
    extract::{FromRequest, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use super::error::{ApiError, ApiErrorType};

/// Drop-in for `axum::Json`: malformed bodies answer with
/// `{"error": {"message", "type", "code"}}` instead of plain text
#[derive(Debug, Clone, Copy, Default, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        // Unparseable and wrongly shaped bodies are both plain bad requests
        let (status, message) = match &rejection {
            JsonRejection::JsonSyntaxError(err) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid JSON syntax: {}", err.body_text()),
            ),
            JsonRejection::JsonDataError(err) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid JSON data: {}", err.body_text()),
            ),
            JsonRejection::MissingJsonContentType(_) => (
                rejection.status(),
                "Missing Content-Type header. Expected 'application/json'.".to_string(),
            ),
            other => (
                other.status(),
                format!("Failed to read request body: {}", other.body_text()),
            ),
        };

        ApiError::new(status, ApiErrorType::InvalidRequestError, message)
            .with_code("json_parse_error")
    }
}
