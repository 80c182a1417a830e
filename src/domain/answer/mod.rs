//! Answer pipeline domain: outcomes and collaborator traits

mod classifier;
mod outcome;
mod researcher;
mod summarizer;

pub use classifier::QueryClassifier;
pub use outcome::{Answer, AnswerSource, Research, Verdict, REJECTION_MESSAGE};
pub use researcher::Researcher;
pub use summarizer::Summarizer;

#[cfg(test)]
pub use classifier::mock::MockQueryClassifier;
#[cfg(test)]
pub use researcher::mock::MockResearcher;
#[cfg(test)]
pub use summarizer::mock::MockSummarizer;
