use async_trait::async_trait;
use std::fmt::Debug;

use super::Verdict;
use crate::domain::{DomainError, NormalizedQuery};

/// Decides whether a query is a legitimate search query
#[async_trait]
pub trait QueryClassifier: Send + Sync + Debug {
    async fn classify(&self, query: &NormalizedQuery) -> Result<Verdict, DomainError>;
}
