//! Chat model abstraction used for classification and summarization

mod chat;
mod provider;

pub use chat::{ChatReply, ChatRequest, ChatTurn, Role};
pub use provider::LlmProvider;

#[cfg(test)]
pub use provider::mock::MockLlmProvider;
