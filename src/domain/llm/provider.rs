use async_trait::async_trait;
use std::fmt::Debug;

use super::{ChatReply, ChatRequest};
use crate::domain::DomainError;

/// A chat-completion backend
#[async_trait]
pub trait LlmProvider: Send + Sync + Debug {
    /// Run one completion against `model`
    async fn complete(&self, model: &str, request: &ChatRequest)
    -> Result<ChatReply, DomainError>;

    fn provider_name(&self) -> &'static str;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    /// Replies with fixed text and records every prompt
    #[derive(Debug)]
    pub struct MockLlmProvider {
        name: &'static str,
        reply: Option<String>,
        error: Option<String>,
        prompts: Mutex<Vec<String>>,
    }

    impl MockLlmProvider {
        pub fn new(name: &'static str) -> Self {
            Self {
                name,
                reply: None,
                error: None,
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn with_reply(mut self, reply: impl Into<String>) -> Self {
            self.reply = Some(reply.into());
            self
        }

        pub fn with_error(mut self, error: impl Into<String>) -> Self {
            self.error = Some(error.into());
            self
        }

        pub fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LlmProvider for MockLlmProvider {
        async fn complete(
            &self,
            model: &str,
            request: &ChatRequest,
        ) -> Result<ChatReply, DomainError> {
            self.prompts.lock().unwrap().push(request.transcript());

            if let Some(ref error) = self.error {
                return Err(DomainError::provider(self.name, error));
            }

            let text = self
                .reply
                .clone()
                .ok_or_else(|| DomainError::provider(self.name, "No mock reply configured"))?;

            Ok(ChatReply {
                model: model.to_string(),
                text,
            })
        }

        fn provider_name(&self) -> &'static str {
            self.name
        }
    }
}
