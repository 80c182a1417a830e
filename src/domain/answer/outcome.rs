//! Classifier verdicts, research outcomes and final answers

use serde::{Deserialize, Serialize};

/// Returned verbatim whenever a query is rejected
pub const REJECTION_MESSAGE: &str = "❌ Invalid query.";

/// Whether a query is worth researching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Valid,
    Invalid,
}

impl Verdict {
    pub fn is_valid(self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Outcome of a live research run
///
/// Every variant is a cacheable answer. The non-summary variants render as
/// fixed sentinel messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Research {
    /// Summarized content; empty when summarization failed
    Summary(String),
    /// The search page could not be fetched
    SearchFailed,
    /// The search page held no result links
    NoResults,
    /// No result page yielded any paragraph text
    NoContent,
}

impl Research {
    pub const SEARCH_FAILED: &'static str = "Failed to fetch search results.";
    pub const NO_RESULTS: &'static str = "No results could be processed.";
    pub const NO_CONTENT: &'static str = "No content to summarize.";

    /// Outcome label used in logs and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Summary(_) => "summary",
            Self::SearchFailed => "search_failed",
            Self::NoResults => "no_results",
            Self::NoContent => "no_content",
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Self::Summary(text) => text,
            Self::SearchFailed => Self::SEARCH_FAILED.to_string(),
            Self::NoResults => Self::NO_RESULTS.to_string(),
            Self::NoContent => Self::NO_CONTENT.to_string(),
        }
    }
}

/// Where an answer came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnswerSource {
    Rejected,
    Cached { similarity: f32 },
    Fresh,
}

impl AnswerSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rejected => "rejected",
            Self::Cached { .. } => "cached",
            Self::Fresh => "fresh",
        }
    }
}

/// Final answer for a raw query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub text: String,
    pub source: AnswerSource,
}

impl Answer {
    pub fn rejected() -> Self {
        Self {
            text: REJECTION_MESSAGE.to_string(),
            source: AnswerSource::Rejected,
        }
    }

    pub fn cached(text: impl Into<String>, similarity: f32) -> Self {
        Self {
            text: text.into(),
            source: AnswerSource::Cached { similarity },
        }
    }

    pub fn fresh(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: AnswerSource::Fresh,
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self.source, AnswerSource::Rejected)
    }
}
