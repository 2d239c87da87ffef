//! The cached embedding service.

use std::sync::Arc;

use moka::future::Cache;
use tracing::debug;

use crate::backend::EmbeddingBackend;
use crate::error::EmbedderError;

/// A text embedding, shared cheaply between the cache and callers.
pub type EmbeddingVector = Arc<Vec<f32>>;

/// Configuration for the embedding service.
#[derive(Debug, Clone)]
pub struct EmbedderConfig {
    /// Maximum number of cached embeddings before eviction kicks in.
    pub max_cache_entries: u64,
}

impl Default for EmbedderConfig {
    fn default() -> Self {
        Self {
            max_cache_entries: 10_000,
        }
    }
}

/// Caching front of an [`EmbeddingBackend`].
///
/// The cache is keyed by the exact text (case-sensitive; normalization
/// happens before text reaches this layer) and bounded by
/// `max_cache_entries` with LRU-flavored eviction. Concurrent misses for the
/// same key coalesce into a single backend call, so a repeated text never
/// reaches the model twice.
///
/// Cheap to clone: clones share the cache and the backend.
#[derive(Clone)]
pub struct Embedder {
    backend: Arc<dyn EmbeddingBackend>,
    cache: Cache<String, EmbeddingVector>,
}

impl Embedder {
    /// Create an embedding service over a backend, with its own cache.
    pub fn new(backend: Arc<dyn EmbeddingBackend>, config: EmbedderConfig) -> Self {
        Self {
            backend,
            cache: Cache::builder()
                .max_capacity(config.max_cache_entries)
                .build(),
        }
    }

    /// Embed a text, serving repeats from the cache.
    ///
    /// The empty string is a valid input and embeds like any other text.
    /// Backend failures are returned to the caller and are not cached, so a
    /// recovered backend serves later calls normally.
    pub async fn embed(&self, text: &str) -> Result<EmbeddingVector, EmbedderError> {
        self.cache
            .try_get_with(text.to_owned(), async {
                debug!(text_len = text.len(), "Embedding cache miss");
                self.backend.embed(text).await.map(Arc::new)
            })
            .await
            .map_err(|e: Arc<EmbedderError>| (*e).clone())
    }

    /// Vector length produced by the underlying backend.
    pub fn dimensions(&self) -> usize {
        self.backend.dimensions()
    }

    /// Number of embeddings currently cached, after pending maintenance.
    pub async fn cached_entries(&self) -> u64 {
        self.cache.run_pending_tasks().await;
        self.cache.entry_count()
    }
}
