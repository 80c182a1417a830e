//! Request and response types for the HTTP API

pub mod error;
pub mod json;
pub mod query;

pub use error::{ApiError, ApiErrorResponse};
pub use json::Json;
pub use query::{CacheStatsResponse, QueryRequest, QueryResponse};
