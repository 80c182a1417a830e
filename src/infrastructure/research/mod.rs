//! Live research: search scraping, page extraction and summarization

mod html;
mod summarizer;
mod web_researcher;

pub use summarizer::LlmSummarizer;
pub use web_researcher::{WebResearcher, WebResearcherConfig};
