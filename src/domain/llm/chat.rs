//! Chat completion request and reply

use serde::{Deserialize, Serialize};

/// Speaker of a chat turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// One turn of a conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

/// A completion request
///
/// Every call is independent; nothing carries over between requests.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    pub turns: Vec<ChatTurn>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl ChatRequest {
    /// A single user turn
    pub fn prompt(text: impl Into<String>) -> Self {
        Self {
            turns: vec![ChatTurn {
                role: Role::User,
                content: text.into(),
            }],
            ..Default::default()
        }
    }

    /// Prepend a system instruction
    pub fn with_system(mut self, text: impl Into<String>) -> Self {
        self.turns.insert(
            0,
            ChatTurn {
                role: Role::System,
                content: text.into(),
            },
        );
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Text of every turn, one per line
    pub fn transcript(&self) -> String {
        self.turns
            .iter()
            .map(|turn| turn.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// The assistant's answer to a [`ChatRequest`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    /// Model that actually served the request
    pub model: String,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_is_single_user_turn() {
        let request = ChatRequest::prompt("Is this a query?");

        assert_eq!(request.turns.len(), 1);
        assert_eq!(request.turns[0].role, Role::User);
        assert!(request.temperature.is_none());
    }

    #[test]
    fn test_system_goes_first() {
        let request = ChatRequest::prompt("hi")
            .with_system("be brief")
            .with_temperature(0.0);

        assert_eq!(request.turns[0].role, Role::System);
        assert_eq!(request.transcript(), "be brief\nhi");
        assert_eq!(request.temperature, Some(0.0));
    }

    #[test]
    fn test_unset_sampling_fields_not_serialized() {
        let json = serde_json::to_value(ChatRequest::prompt("hi")).unwrap();

        assert!(json.get("temperature").is_none());
        assert!(json.get("max_tokens").is_none());
        assert_eq!(json["turns"][0]["role"], "user");
    }
}
