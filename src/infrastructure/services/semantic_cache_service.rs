//! Semantic query cache
//!
//! Combines the embedder, a flat vector index with its parallel key list,
//! the exact store and the index store. Near-duplicate queries resolve to
//! the result stored for the first phrasing.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex as StdMutex};

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info, warn};

use crate::domain::semantic_cache::{
    CacheHit, FlatIndex, IndexSnapshot, IndexStore, SemanticCacheConfig, SemanticCacheStats,
};
use crate::domain::{DomainError, Embedder, ExactStore, NormalizedQuery};
use crate::infrastructure::observability::{record_cache_insert, record_cache_lookup, LookupOutcome};

/// Vector index and key list; always the same length
#[derive(Debug, Clone, Default)]
struct IndexState {
    index: FlatIndex,
    keys: Vec<NormalizedQuery>,
}

impl IndexState {
    fn snapshot(&self) -> IndexSnapshot {
        IndexSnapshot::new(&self.index, &self.keys)
    }
}

/// Semantic cache over an exact store and a persisted vector index
#[derive(Debug)]
pub struct SemanticQueryCache {
    embedder: Embedder,
    exact_store: Arc<dyn ExactStore>,
    index_store: Arc<dyn IndexStore>,
    config: SemanticCacheConfig,
    state: RwLock<IndexState>,
    writer: Mutex<()>,
    hits: AtomicU64,
    misses: AtomicU64,
    inserts: AtomicU64,
    /// Indexed keys last seen without a stored result
    dangling: StdMutex<HashSet<NormalizedQuery>>,
}

impl SemanticQueryCache {
    /// Load persisted state, or start empty when nothing was saved yet
    ///
    /// Fails with a configuration error when the saved vectors disagree with
    /// the embedder's dimension.
    pub async fn open(
        embedder: Embedder,
        exact_store: Arc<dyn ExactStore>,
        index_store: Arc<dyn IndexStore>,
        config: SemanticCacheConfig,
    ) -> Result<Self, DomainError> {
        let expected = embedder.dimensions();

        let state = match index_store.load().await? {
            Some(snapshot) => {
                let (index, keys) = snapshot.into_parts()?;

                if let (Some(expected), Some(found)) = (expected, index.dimension()) {
                    if expected != found {
                        return Err(DomainError::configuration(format!(
                            "Index at {} has dimension {} but model '{}' produces {}",
                            index_store.location(),
                            found,
                            embedder.model(),
                            expected
                        )));
                    }
                }

                info!(
                    location = %index_store.location(),
                    entries = keys.len(),
                    "Loaded vector index"
                );
                IndexState { index, keys }
            }
            None => {
                info!(location = %index_store.location(), "Starting with an empty vector index");
                IndexState {
                    index: FlatIndex::new(expected),
                    keys: Vec::new(),
                }
            }
        };

        Ok(Self {
            embedder,
            exact_store,
            index_store,
            config,
            state: RwLock::new(state),
            writer: Mutex::new(()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            inserts: AtomicU64::new(0),
            dangling: StdMutex::new(HashSet::new()),
        })
    }

    pub fn config(&self) -> &SemanticCacheConfig {
        &self.config
    }

    pub fn exact_store(&self) -> &Arc<dyn ExactStore> {
        &self.exact_store
    }

    /// Number of indexed queries
    pub async fn len(&self) -> usize {
        self.state.read().await.keys.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Find a stored result for a semantically equivalent query
    ///
    /// Only the single nearest neighbor is considered. Exact store failures
    /// propagate; embedding failures count as a miss.
    pub async fn lookup(&self, query: &NormalizedQuery) -> Result<Option<CacheHit>, DomainError> {
        if self.is_empty().await {
            return Ok(self.miss(LookupOutcome::Miss));
        }

        let vector = match self.embedder.embed(query.as_str()).await {
            Ok(vector) => vector,
            Err(e) => {
                warn!(error = %e, "Failed to embed query for cache lookup");
                return Ok(self.miss(LookupOutcome::EmbedError));
            }
        };

        let candidate = {
            let state = self.state.read().await;
            state
                .index
                .nearest(&vector)?
                .map(|hit| (state.keys[hit.position].clone(), hit.similarity))
        };

        let Some((matched_query, similarity)) = candidate else {
            return Ok(self.miss(LookupOutcome::Miss));
        };

        if similarity < self.config.similarity_threshold {
            debug!(
                similarity,
                threshold = self.config.similarity_threshold,
                "Nearest neighbor below threshold"
            );
            return Ok(self.miss(LookupOutcome::Miss));
        }

        match self.exact_store.get(matched_query.as_str()).await? {
            Some(result) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                record_cache_lookup(LookupOutcome::Hit);
                debug!(similarity, matched = %matched_query, "Semantic cache hit");

                Ok(Some(CacheHit {
                    result,
                    matched_query,
                    similarity,
                }))
            }
            None => {
                warn!(
                    key = %matched_query,
                    similarity,
                    "Indexed query has no stored result"
                );
                self.mark_dangling(matched_query);
                Ok(self.miss(LookupOutcome::Dangling))
            }
        }
    }

    /// Record a query and its result
    ///
    /// The result is written to the exact store before the index grows. The
    /// grown index is persisted before it becomes visible to lookups, so a
    /// failed save leaves the live index unchanged and the error is returned.
    /// Re-inserting a query adds a second index position.
    pub async fn insert(&self, query: &NormalizedQuery, result: &str) -> Result<(), DomainError> {
        let _writer = self.writer.lock().await;

        let vector = self.embedder.embed(query.as_str()).await?;

        self.exact_store.set(query.as_str(), result).await?;

        // Lookups keep reading the current state while the next one is saved
        let mut next = self.state.read().await.clone();
        let position = next.index.insert(vector)?;
        next.keys.push(query.clone());

        if let Err(e) = self.index_store.save(&next.snapshot()).await {
            error!(
                error = %e,
                location = %self.index_store.location(),
                "Failed to persist vector index; insert discarded"
            );
            return Err(e);
        }

        *self.state.write().await = next;
        self.clear_dangling(query);

        self.inserts.fetch_add(1, Ordering::Relaxed);
        record_cache_insert();
        debug!(position, key = %query, "Inserted query into semantic cache");

        Ok(())
    }

    /// Count indexed keys whose result is missing from the exact store
    ///
    /// Lookups landing on such keys already report a miss, so the answer is
    /// refetched and re-inserted on demand.
    pub async fn reconcile(&self) -> Result<u64, DomainError> {
        let keys = self.state.read().await.keys.clone();

        let mut found = HashSet::new();
        for key in &keys {
            if self.exact_store.get(key.as_str()).await?.is_none() {
                warn!(key = %key, "Indexed query has no stored result");
                found.insert(key.clone());
            }
        }

        let dangling = found.len() as u64;
        if let Ok(mut set) = self.dangling.lock() {
            *set = found;
        }

        if dangling > 0 {
            error!(
                dangling,
                total = keys.len(),
                backend = self.exact_store.backend_name(),
                "Vector index references results missing from the exact store"
            );
        } else {
            info!(total = keys.len(), "Vector index consistent with exact store");
        }

        Ok(dangling)
    }

    /// Save the current index and keys
    pub async fn persist(&self) -> Result<(), DomainError> {
        let _writer = self.writer.lock().await;
        let snapshot = self.state.read().await.snapshot();

        self.index_store.save(&snapshot).await?;
        info!(
            location = %self.index_store.location(),
            entries = snapshot.len(),
            "Persisted vector index"
        );

        Ok(())
    }

    pub async fn stats(&self) -> SemanticCacheStats {
        let state = self.state.read().await;

        SemanticCacheStats {
            total_entries: state.keys.len(),
            dimension: state.index.dimension(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            inserts: self.inserts.load(Ordering::Relaxed),
            dangling_keys: self.dangling_count(),
        }
    }

    fn mark_dangling(&self, key: NormalizedQuery) {
        if let Ok(mut set) = self.dangling.lock() {
            set.insert(key);
        }
    }

    fn clear_dangling(&self, key: &NormalizedQuery) {
        if let Ok(mut set) = self.dangling.lock() {
            set.remove(key);
        }
    }

    fn dangling_count(&self) -> u64 {
        self.dangling.lock().map(|set| set.len() as u64).unwrap_or(0)
    }

    fn miss(&self, outcome: LookupOutcome) -> Option<CacheHit> {
        self.misses.fetch_add(1, Ordering::Relaxed);
        record_cache_lookup(outcome);
        None
    }
}
