//! Text-to-vector embedding for the PickWise recommendation core.
//!
//! This crate owns everything between raw text and similarity scores:
//! - Lazy, memoized initialization of a local sentence-embedding model
//!   (all-MiniLM-L6-v2 over ONNX); concurrent first callers await the same
//!   in-flight load
//! - A bounded embedding cache keyed by exact text, injected at
//!   construction rather than living as ambient global state
//! - Cosine similarity over embedding vectors
//! - Typed errors the scoring layer degrades on instead of surfacing
//!
//! ## Example Usage
//!
//! ```ignore
//! use embedder::{Embedder, EmbedderConfig, LocalModelBackend, cosine_similarity};
//! use std::sync::Arc;
//!
//! let embedder = Embedder::new(Arc::new(LocalModelBackend::mini_lm()), EmbedderConfig::default());
//! let a = embedder.embed("epic space opera").await?;
//! let b = embedder.embed("galactic battles").await?;
//! let score = cosine_similarity(&a, &b);
//! ```

// Public modules
pub mod backend;
pub mod error;
pub mod local;
pub mod service;
pub mod vector;

// Re-export commonly used types
pub use backend::EmbeddingBackend;
pub use error::EmbedderError;
pub use local::{LocalModelBackend, SentenceEncoder, MINI_LM_DIMENSIONS};
pub use service::{Embedder, EmbedderConfig, EmbeddingVector};
pub use vector::cosine_similarity;
