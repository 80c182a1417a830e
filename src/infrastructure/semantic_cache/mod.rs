//! Semantic cache infrastructure

mod file_store;

pub use file_store::FileIndexStore;
