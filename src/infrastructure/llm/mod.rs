//! LLM provider implementations

mod openai;

pub use openai::OpenAiProvider;
pub(crate) use openai::DEFAULT_OPENAI_BASE_URL;
