use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::llm::ChatTurn;
use crate::domain::{ChatReply, ChatRequest, DomainError, LlmProvider};
use crate::infrastructure::http_client::HttpClientTrait;

pub(crate) const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";

/// Chat completions over the OpenAI HTTP API, or any server speaking it
#[derive(Debug)]
pub struct OpenAiProvider<C: HttpClientTrait> {
    client: C,
    auth_header: String,
    endpoint: String,
}

impl<C: HttpClientTrait> OpenAiProvider<C> {
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
            endpoint: format!("{}/v1/chat/completions", base_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl<C: HttpClientTrait> LlmProvider for OpenAiProvider<C> {
    async fn complete(
        &self,
        model: &str,
        request: &ChatRequest,
    ) -> Result<ChatReply, DomainError> {
        let body = serde_json::to_value(CompletionBody::new(model, request))
            .map_err(|e| DomainError::internal(format!("Failed to encode request: {}", e)))?;
        let headers = vec![
            ("Authorization", self.auth_header.as_str()),
            ("Content-Type", "application/json"),
        ];

        let json = self.client.post_json(&self.endpoint, headers, &body).await?;
        let completion: Completion = serde_json::from_value(json).map_err(|e| {
            DomainError::provider("openai", format!("Failed to parse response: {}", e))
        })?;

        if let Some(usage) = &completion.usage {
            debug!(
                model = %completion.model,
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Chat completion finished"
            );
        }

        let text = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::provider("openai", "No choices in response"))?
            .message
            .content
            .unwrap_or_default();

        Ok(ChatReply {
            model: completion.model,
            text,
        })
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}

#[derive(Serialize)]
struct CompletionBody<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

impl<'a> CompletionBody<'a> {
    fn new(model: &'a str, request: &'a ChatRequest) -> Self {
        Self {
            model,
            messages: request.turns.iter().map(WireMessage::from).collect(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        }
    }
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

impl<'a> From<&'a ChatTurn> for WireMessage<'a> {
    fn from(turn: &'a ChatTurn) -> Self {
        Self {
            role: turn.role.as_str(),
            content: &turn.content,
        }
    }
}

#[derive(Deserialize)]
struct Completion {
    model: String,
    choices: Vec<Choice>,
    usage: Option<TokenUsage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct TokenUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::http_client::mock::MockHttpClient;
    use serde_json::json;

    const TEST_URL: &str = "https://api.openai.com/v1/chat/completions";

    fn reply(content: &str) -> serde_json::Value {
        json!({
            "id": "chatcmpl-123",
            "model": "gpt-4o-mini-2024-07-18",
            "choices": [{
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }],
            "usage": { "prompt_tokens": 10, "completion_tokens": 1, "total_tokens": 11 }
        })
    }

    #[tokio::test]
    async fn test_complete_returns_first_choice() {
        let client = MockHttpClient::new().with_response(TEST_URL, reply("YES"));
        let provider = OpenAiProvider::new(client, "test-api-key");

        let request = ChatRequest::prompt("Is this a query?").with_temperature(0.0);
        let reply = provider.complete("gpt-4o-mini", &request).await.unwrap();

        assert_eq!(reply.text, "YES");
        assert_eq!(reply.model, "gpt-4o-mini-2024-07-18");
    }

    #[tokio::test]
    async fn test_request_body_shape() {
        let client = MockHttpClient::new().with_response(TEST_URL, reply("ok"));
        let provider = OpenAiProvider::new(client, "key");

        let request = ChatRequest::prompt("Summarize").with_max_tokens(64);
        provider.complete("gpt-4o-mini", &request).await.unwrap();

        let (_, body) = provider.client.requests().remove(0);
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "Summarize");
        assert_eq!(body["max_tokens"], 64);
        assert!(body.get("temperature").is_none());
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let client = MockHttpClient::new().with_error(TEST_URL, "API key invalid");
        let provider = OpenAiProvider::new(client, "invalid-key");

        let result = provider
            .complete("gpt-4o-mini", &ChatRequest::prompt("Hello!"))
            .await;

        assert!(matches!(result, Err(DomainError::Provider { .. })));
    }

    #[tokio::test]
    async fn test_empty_choices_is_error() {
        let client = MockHttpClient::new()
            .with_response(TEST_URL, json!({ "model": "m", "choices": [] }));
        let provider = OpenAiProvider::new(client, "key");

        let result = provider
            .complete("gpt-4o-mini", &ChatRequest::prompt("Hello!"))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_null_content_is_empty_text() {
        let body = json!({ "model": "m", "choices": [{ "message": { "content": null } }] });
        let client = MockHttpClient::new().with_response(TEST_URL, body);
        let provider = OpenAiProvider::new(client, "key");

        let reply = provider
            .complete("m", &ChatRequest::prompt("Hello!"))
            .await
            .unwrap();
        assert_eq!(reply.text, "");
    }

    #[tokio::test]
    async fn test_custom_base_url_trailing_slash() {
        let custom_url = "http://localhost:8080/v1/chat/completions";
        let client = MockHttpClient::new().with_response(custom_url, reply("Custom response"));
        let provider = OpenAiProvider::with_base_url(client, "test-key", "http://localhost:8080/");

        let reply = provider
            .complete("local", &ChatRequest::prompt("Test"))
            .await
            .unwrap();

        assert_eq!(reply.text, "Custom response");
    }
}
