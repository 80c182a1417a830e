//! Query normalization

use std::fmt;

use serde::{Deserialize, Serialize};

/// A query after trimming and lowercasing
///
/// This is the canonical key for both the exact store and the vector index:
/// two raw inputs that normalize identically are the same query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedQuery(String);

impl NormalizedQuery {
    /// Normalize a raw query string
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for NormalizedQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NormalizedQuery {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl AsRef<str> for NormalizedQuery {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
