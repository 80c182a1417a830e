//! File-backed index store
//!
//! The vectors and the key list live in two JSON files: `<path>` and
//! `<path>.keys`. Each is written to a temporary sibling and renamed into
//! place, vectors first. The pair is not replaced atomically: a crash between
//! the two renames leaves the newer vector file beside the older keys file.
//! The index only grows by appending, so on load any vectors past the end of
//! the key list are dropped and the older snapshot is recovered.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::semantic_cache::{IndexSnapshot, IndexStore};
use crate::domain::{DomainError, NormalizedQuery};

#[derive(Debug, Serialize, Deserialize)]
struct VectorFile {
    dimension: Option<usize>,
    vectors: Vec<Vec<f32>>,
}

/// Index store persisting to a vector file and a keys file
#[derive(Debug, Clone)]
pub struct FileIndexStore {
    index_path: PathBuf,
    keys_path: PathBuf,
}

impl FileIndexStore {
    /// Store at `index_path`, with keys at `index_path` + `.keys`
    pub fn new(index_path: impl Into<PathBuf>) -> Self {
        let index_path = index_path.into();
        let mut keys_path = index_path.clone().into_os_string();
        keys_path.push(".keys");

        Self {
            index_path,
            keys_path: PathBuf::from(keys_path),
        }
    }

    pub fn index_path(&self) -> &Path {
        &self.index_path
    }

    pub fn keys_path(&self) -> &Path {
        &self.keys_path
    }

    async fn read_optional(path: &Path) -> Result<Option<Vec<u8>>, DomainError> {
        match tokio::fs::read(path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DomainError::persistence(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), DomainError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                DomainError::persistence(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let mut tmp_path = path.as_os_str().to_owned();
        tmp_path.push(".tmp");
        let tmp_path = PathBuf::from(tmp_path);

        tokio::fs::write(&tmp_path, bytes).await.map_err(|e| {
            DomainError::persistence(format!("Failed to write {}: {}", tmp_path.display(), e))
        })?;

        tokio::fs::rename(&tmp_path, path).await.map_err(|e| {
            DomainError::persistence(format!("Failed to replace {}: {}", path.display(), e))
        })
    }
}

#[async_trait]
impl IndexStore for FileIndexStore {
    async fn load(&self) -> Result<Option<IndexSnapshot>, DomainError> {
        let vectors = Self::read_optional(&self.index_path).await?;
        let keys = Self::read_optional(&self.keys_path).await?;

        let (vectors, keys) = match (vectors, keys) {
            (None, None) => return Ok(None),
            (Some(vectors), Some(keys)) => (vectors, keys),
            (Some(_), None) => {
                return Err(DomainError::persistence(format!(
                    "Found {} without {}",
                    self.index_path.display(),
                    self.keys_path.display()
                )));
            }
            (None, Some(_)) => {
                return Err(DomainError::persistence(format!(
                    "Found {} without {}",
                    self.keys_path.display(),
                    self.index_path.display()
                )));
            }
        };

        let vector_file: VectorFile = serde_json::from_slice(&vectors).map_err(|e| {
            DomainError::persistence(format!(
                "Corrupt vector file {}: {}",
                self.index_path.display(),
                e
            ))
        })?;
        let keys: Vec<NormalizedQuery> = serde_json::from_slice(&keys).map_err(|e| {
            DomainError::persistence(format!(
                "Corrupt keys file {}: {}",
                self.keys_path.display(),
                e
            ))
        })?;

        let mut vectors = vector_file.vectors;
        if vectors.len() > keys.len() {
            warn!(
                path = %self.index_path.display(),
                vectors = vectors.len(),
                keys = keys.len(),
                "Vector file is ahead of its keys file; dropping unkeyed vectors"
            );
            vectors.truncate(keys.len());
        }

        Ok(Some(IndexSnapshot {
            dimension: vector_file.dimension,
            vectors,
            keys,
        }))
    }

    async fn save(&self, snapshot: &IndexSnapshot) -> Result<(), DomainError> {
        let vector_file = VectorFile {
            dimension: snapshot.dimension,
            vectors: snapshot.vectors.clone(),
        };

        let vectors = serde_json::to_vec(&vector_file)
            .map_err(|e| DomainError::persistence(format!("Failed to encode vectors: {}", e)))?;
        let keys = serde_json::to_vec(&snapshot.keys)
            .map_err(|e| DomainError::persistence(format!("Failed to encode keys: {}", e)))?;

        Self::write_atomic(&self.index_path, &vectors).await?;
        Self::write_atomic(&self.keys_path, &keys).await?;

        debug!(
            path = %self.index_path.display(),
            entries = snapshot.len(),
            "Saved vector index"
        );

        Ok(())
    }

    fn location(&self) -> String {
        self.index_path.display().to_string()
    }
}
