//! Request/response logging with a propagated request id

use std::time::Instant;

use axum::{
    body::Body,
    extract::MatchedPath,
    http::{HeaderMap, HeaderName, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use tracing::{info, warn};
use uuid::Uuid;

pub static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Logs one event when a request arrives and one when it completes.
///
/// Reuses the caller's `x-request-id` or mints one, and echoes it on the
/// response. Spans come from `TraceLayer`; this only emits events.
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|mp| mp.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());
    let request_id = request_id(request.headers());

    info!(
        method = %method,
        path = %path,
        request_id = %request_id,
        user_agent = header_str(request.headers(), "user-agent"),
        content_length = header_str(request.headers(), "content-length"),
        "Incoming request"
    );

    let mut response = next.run(request).await;
    let status = response.status();
    let duration_ms = start.elapsed().as_millis() as u64;

    if status.is_server_error() {
        warn!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            duration_ms,
            request_id = %request_id,
            "Request failed"
        );
    } else {
        info!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            duration_ms,
            request_id = %request_id,
            "Request completed"
        );
    }

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER.clone(), value);
    }

    response
}

fn request_id(headers: &HeaderMap) -> String {
    headers
        .get(&REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty() && v.len() <= 128)
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
}

/// Cut a string to `max_len` characters for logging
pub fn truncate_for_log(s: &str, max_len: usize) -> String {
    match s.char_indices().nth(max_len) {
        None => s.to_string(),
        Some((byte_idx, _)) => {
            let rest = s[byte_idx..].chars().count();
            format!("{}...[truncated {} chars]", &s[..byte_idx], rest)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, http::StatusCode, middleware, routing::get};
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new()
            .route("/live", get(|| async { StatusCode::OK }))
            .layer(middleware::from_fn(logging_middleware))
    }

    #[tokio::test]
    async fn test_echoes_caller_request_id() {
        let request = Request::builder()
            .uri("/live")
            .header("x-request-id", "abc-123")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.headers()["x-request-id"], "abc-123");
    }

    #[tokio::test]
    async fn test_mints_request_id_when_missing() {
        let request = Request::builder().uri("/live").body(Body::empty()).unwrap();

        let response = app().oneshot(request).await.unwrap();

        let id = response.headers()["x-request-id"].to_str().unwrap();
        assert!(Uuid::parse_str(id).is_ok());
    }

    #[test]
    fn test_oversized_request_id_replaced() {
        let mut headers = HeaderMap::new();
        headers.insert("x-request-id", HeaderValue::from_str(&"x".repeat(200)).unwrap());

        assert!(Uuid::parse_str(&request_id(&headers)).is_ok());
    }

    #[test]
    fn test_truncate_for_log() {
        assert_eq!(truncate_for_log("hello", 10), "hello");

        let truncated = truncate_for_log("hello world this is a very long string", 10);
        assert!(truncated.starts_with("hello worl..."));
        assert!(truncated.ends_with("[truncated 28 chars]"));
    }

    #[test]
    fn test_truncate_for_log_exact_length() {
        assert_eq!(truncate_for_log("exactly10!", 10), "exactly10!");
    }

    #[test]
    fn test_truncate_for_log_multibyte() {
        let truncated = truncate_for_log("¿qué es la fotosíntesis?", 6);
        assert!(truncated.starts_with("¿qué e..."));
        assert!(truncated.contains("[truncated 18 chars]"));
    }
}
