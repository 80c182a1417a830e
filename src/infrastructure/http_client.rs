//! Shared HTTP client used by LLM, embedding and research adapters

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::DomainError;

/// Status and body of a plain GET
#[derive(Debug, Clone)]
pub struct HttpTextResponse {
    pub status: u16,
    pub body: String,
}

impl HttpTextResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Trait for HTTP client operations (for mocking)
#[async_trait]
pub trait HttpClientTrait: Send + Sync + std::fmt::Debug {
    /// POST a JSON body, failing on non-success status
    async fn post_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, DomainError>;

    /// GET a page as text; non-success statuses are returned, not raised
    async fn get_text(&self, url: &str) -> Result<HttpTextResponse, DomainError>;
}

/// Real HTTP client using reqwest
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, DomainError> {
        Self::build(timeout, None)
    }

    /// Client sending a fixed User-Agent on every request
    pub fn with_user_agent(timeout: Duration, user_agent: &str) -> Result<Self, DomainError> {
        Self::build(timeout, Some(user_agent))
    }

    fn build(timeout: Duration, user_agent: Option<&str>) -> Result<Self, DomainError> {
        let mut builder = reqwest::Client::builder().timeout(timeout);

        if let Some(user_agent) = user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder.build().map_err(|e| {
            DomainError::configuration(format!("Failed to build HTTP client: {}", e))
        })?;

        Ok(Self { client })
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClientTrait for HttpClient {
    async fn post_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, DomainError> {
        let mut request = self.client.post(url);

        for (key, value) in headers {
            request = request.header(key, value);
        }

        let response = request
            .json(body)
            .send()
            .await
            .map_err(|e| DomainError::provider("http", format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_default();
            return Err(DomainError::provider(
                "http",
                format!("HTTP {}: {}", status, error_body),
            ));
        }

        response
            .json()
            .await
            .map_err(|e| DomainError::provider("http", format!("Failed to parse response: {}", e)))
    }

    async fn get_text(&self, url: &str) -> Result<HttpTextResponse, DomainError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DomainError::fetch(url, e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| DomainError::fetch(url, format!("Failed to read body: {}", e)))?;

        Ok(HttpTextResponse { status, body })
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::RwLock;

    #[derive(Debug, Default)]
    pub struct MockHttpClient {
        responses: RwLock<HashMap<String, serde_json::Value>>,
        pages: RwLock<HashMap<String, HttpTextResponse>>,
        errors: RwLock<HashMap<String, String>>,
        requests: RwLock<Vec<(String, serde_json::Value)>>,
    }

    impl MockHttpClient {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_response(self, url: impl Into<String>, response: serde_json::Value) -> Self {
            self.responses.write().unwrap().insert(url.into(), response);
            self
        }

        pub fn with_page(self, url: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
            self.pages.write().unwrap().insert(
                url.into(),
                HttpTextResponse {
                    status,
                    body: body.into(),
                },
            );
            self
        }

        pub fn with_error(self, url: impl Into<String>, error: impl Into<String>) -> Self {
            self.errors.write().unwrap().insert(url.into(), error.into());
            self
        }

        /// JSON bodies posted so far, with their URLs
        pub fn requests(&self) -> Vec<(String, serde_json::Value)> {
            self.requests.read().unwrap().clone()
        }
    }

    #[async_trait]
    impl HttpClientTrait for MockHttpClient {
        async fn post_json(
            &self,
            url: &str,
            _headers: Vec<(&str, &str)>,
            body: &serde_json::Value,
        ) -> Result<serde_json::Value, DomainError> {
            self.requests
                .write()
                .unwrap()
                .push((url.to_string(), body.clone()));

            if let Some(error) = self.errors.read().unwrap().get(url) {
                return Err(DomainError::provider("mock", error));
            }

            self.responses
                .read()
                .unwrap()
                .get(url)
                .cloned()
                .ok_or_else(|| DomainError::provider("mock", format!("No mock response for {}", url)))
        }

        async fn get_text(&self, url: &str) -> Result<HttpTextResponse, DomainError> {
            if let Some(error) = self.errors.read().unwrap().get(url) {
                return Err(DomainError::fetch(url, error));
            }

            Ok(self
                .pages
                .read()
                .unwrap()
                .get(url)
                .cloned()
                .unwrap_or(HttpTextResponse {
                    status: 404,
                    body: String::new(),
                }))
        }
    }
}
