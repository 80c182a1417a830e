//! Exact store domain - durable mapping from normalized query to result text

mod repository;

pub use repository::ExactStore;

#[cfg(test)]
pub use repository::mock::MockExactStore;
