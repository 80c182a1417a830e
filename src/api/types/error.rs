//! API error types

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::DomainError;

/// Error categories exposed in the `type` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorType {
    InvalidRequestError,
    NotFoundError,
    ServerError,
}

impl ApiErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidRequestError => "invalid_request_error",
            Self::NotFoundError => "not_found_error",
            Self::ServerError => "server_error",
        }
    }
}

/// Error response body: `{"error": {"message", "type", "code"?}}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: ApiErrorType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// Error returned by handlers, rendered with its status code
#[derive(Debug, Error)]
#[error("{}: {}", .response.error.error_type.as_str(), .response.error.message)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ApiErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, error_type: ApiErrorType, message: impl Into<String>) -> Self {
        Self {
            status,
            response: ApiErrorResponse {
                error: ApiErrorDetail {
                    message: message.into(),
                    error_type,
                    code: None,
                },
            },
        }
    }

    /// Machine-readable code alongside the type
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.response.error.code = Some(code.into());
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ApiErrorType::InvalidRequestError, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, ApiErrorType::NotFoundError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, ApiErrorType::ServerError, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

/// Validation maps to 400; every other failure is a request-level 500
impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation { message } => Self::bad_request(message),
            other => Self::internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_bad_request() {
        let api_err: ApiError = DomainError::validation("bad input").into();

        assert_eq!(api_err.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_err.response.error.error_type, ApiErrorType::InvalidRequestError);
        assert_eq!(api_err.response.error.message, "bad input");
    }

    #[test]
    fn test_other_domain_errors_map_to_server_error() {
        for domain_err in [
            DomainError::store("connection refused"),
            DomainError::persistence("disk full"),
            DomainError::provider("openai", "timeout"),
            DomainError::configuration("missing key"),
        ] {
            let api_err: ApiError = domain_err.into();
            assert_eq!(api_err.status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(api_err.response.error.error_type, ApiErrorType::ServerError);
        }
    }

    #[test]
    fn test_body_shape() {
        let err = ApiError::internal("Store error: connection refused");
        let json = serde_json::to_value(&err.response).unwrap();

        assert_eq!(json["error"]["type"], "server_error");
        assert_eq!(json["error"]["message"], "Store error: connection refused");
        assert!(json["error"].get("code").is_none());
    }

    #[test]
    fn test_code_is_serialized_when_set() {
        let err = ApiError::bad_request("nope").with_code("json_parse_error");
        let json = serde_json::to_value(&err.response).unwrap();

        assert_eq!(json["error"]["code"], "json_parse_error");
    }

    #[test]
    fn test_display() {
        assert_eq!(
            ApiError::not_found("No route for /nope").to_string(),
            "not_found_error: No route for /nope"
        );
    }

    #[test]
    fn test_type_names_match_serde() {
        for error_type in [
            ApiErrorType::InvalidRequestError,
            ApiErrorType::NotFoundError,
            ApiErrorType::ServerError,
        ] {
            assert_eq!(
                serde_json::to_value(error_type).unwrap(),
                error_type.as_str()
            );
        }
    }
}
