//! Error types for the embedder crate.

use thiserror::Error;

/// Errors that can occur when producing embeddings
///
/// Every variant means the same thing to callers: embeddings are unavailable
/// right now. The per-item scorer recovers by degrading the whole batch; the
/// error is never surfaced raw to an end user.
///
/// `Clone` is deliberate: a memoized initialization failure is handed to
/// every caller that awaits it.
#[derive(Error, Debug, Clone)]
pub enum EmbedderError {
    /// The embedding model failed to load
    #[error("Failed to load embedding model: {0}")]
    ModelLoad(String),

    /// The model rejected or failed an embedding computation
    #[error("Failed to compute embedding: {0}")]
    Inference(String),

    /// The background encoder task is gone
    #[error("Embedding worker unavailable: {0}")]
    WorkerGone(String),
}
