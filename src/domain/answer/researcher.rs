use async_trait::async_trait;
use std::fmt::Debug;

use super::Research;
use crate::domain::NormalizedQuery;

/// Fetches live data for a query and condenses it into an answer
///
/// Research never fails outright: fetch problems surface as sentinel
/// outcomes, which are cached like any other answer.
#[async_trait]
pub trait Researcher: Send + Sync + Debug {
    async fn research(&self, query: &NormalizedQuery) -> Research;
}
