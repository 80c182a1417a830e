use async_trait::async_trait;
use std::fmt::Debug;

/// Condenses fetched page text into a short answer
///
/// Summarization fails soft: any error yields an empty string.
#[async_trait]
pub trait Summarizer: Send + Sync + Debug {
    async fn summarize(&self, text: &str) -> String;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    /// Summarizer that prefixes its input, recording what it was given
    #[derive(Debug, Default)]
    pub struct MockSummarizer {
        inputs: Mutex<Vec<String>>,
    }

    impl MockSummarizer {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn inputs(&self) -> Vec<String> {
            self.inputs.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Summarizer for MockSummarizer {
        async fn summarize(&self, text: &str) -> String {
            self.inputs.lock().unwrap().push(text.to_string());
            format!("summary: {}", text)
        }
    }
}
