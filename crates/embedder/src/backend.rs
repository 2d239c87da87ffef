//! The embedding backend seam.

use async_trait::async_trait;

use crate::error::EmbedderError;

/// A text-to-vector model.
///
/// The production implementation is
/// [`LocalModelBackend`](crate::local::LocalModelBackend); tests inject
/// deterministic or failing stand-ins.
///
/// ## Design Note
/// - `Send + Sync` so a backend can be shared behind an `Arc` across
///   concurrent scoring requests
/// - `embed` is async: the first call may suspend for a long model load
#[async_trait]
pub trait EmbeddingBackend: Send + Sync {
    /// Embed one text into a fixed-length vector.
    ///
    /// The empty string is a valid input and must embed to a valid vector,
    /// not fail.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedderError>;

    /// Length of the vectors this backend produces.
    fn dimensions(&self) -> usize;
}
