//! Local ONNX embedding backend (all-MiniLM-L6-v2 via fastembed).
//!
//! The model load is expensive (downloading/reading weights, building the
//! ONNX session), so it happens lazily on first use: the first caller
//! triggers the load on a blocking thread and every concurrent caller awaits
//! the same in-flight initialization. The outcome of that one initialization,
//! success or failure, is memoized for the process lifetime.
//!
//! Once loaded, the model lives on a dedicated blocking task that serves
//! encode requests over a channel; the channel serializes access to the
//! model without locks.

use std::sync::Arc;

use async_trait::async_trait;
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use tokio::sync::{mpsc, oneshot, OnceCell};
use tracing::{debug, info};

use crate::backend::EmbeddingBackend;
use crate::error::EmbedderError;

/// Vector length of all-MiniLM-L6-v2.
pub const MINI_LM_DIMENSIONS: usize = 384;

/// Depth of the request queue feeding the encoder task.
const ENCODER_QUEUE: usize = 64;

/// A loaded sentence-embedding model.
///
/// fastembed's `TextEmbedding` implements this for production; tests supply
/// counting or failing encoders.
pub trait SentenceEncoder: Send {
    /// Encode a batch of texts into pooled, normalized fixed-length vectors.
    fn encode(&mut self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, String>;
}

impl SentenceEncoder for TextEmbedding {
    fn encode(&mut self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, String> {
        self.embed(texts, None).map_err(|e| e.to_string())
    }
}

/// Builds an encoder; runs at most once, on a blocking thread.
type EncoderLoader = dyn Fn() -> Result<Box<dyn SentenceEncoder>, String> + Send + Sync;

/// Embedding backend that owns a lazily-loaded local model.
pub struct LocalModelBackend {
    state: OnceCell<Result<EncoderHandle, EmbedderError>>,
    loader: Arc<EncoderLoader>,
    dimensions: usize,
}

impl LocalModelBackend {
    /// Backend for the default all-MiniLM-L6-v2 model.
    pub fn mini_lm() -> Self {
        Self::with_loader(MINI_LM_DIMENSIONS, || {
            let options = InitOptions::new(EmbeddingModel::AllMiniLML6V2);
            let model = TextEmbedding::try_new(options).map_err(|e| e.to_string())?;
            Ok(Box::new(model) as Box<dyn SentenceEncoder>)
        })
    }

    /// Backend with a custom encoder loader.
    ///
    /// The loader runs at most once, on a blocking thread, when the first
    /// embed call arrives.
    pub fn with_loader(
        dimensions: usize,
        loader: impl Fn() -> Result<Box<dyn SentenceEncoder>, String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            state: OnceCell::new(),
            loader: Arc::new(loader),
            dimensions,
        }
    }

    /// Load the model and spawn the encoder task serving it.
    ///
    /// Runs through `OnceCell::get_or_init`, so concurrent first callers all
    /// await this single initialization, and its outcome (including failure)
    /// is remembered for the process lifetime.
    async fn initialize(&self) -> Result<EncoderHandle, EmbedderError> {
        info!("Loading local embedding model ({} dims)", self.dimensions);
        let loader = Arc::clone(&self.loader);
        let encoder = tokio::task::spawn_blocking(move || loader())
            .await
            .map_err(|e| EmbedderError::ModelLoad(format!("model load task panicked: {e}")))?
            .map_err(EmbedderError::ModelLoad)?;
        info!("Embedding model ready");
        Ok(EncoderHandle::spawn(encoder))
    }
}

#[async_trait]
impl EmbeddingBackend for LocalModelBackend {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedderError> {
        let state = self.state.get_or_init(|| self.initialize()).await;
        let handle = state.as_ref().map_err(|e| e.clone())?;

        let mut vectors = handle.encode(vec![text.to_owned()]).await?;
        vectors
            .pop()
            .ok_or_else(|| EmbedderError::Inference("model returned no vector".into()))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

/// Channel handle to the blocking task that owns the loaded model.
#[derive(Clone)]
struct EncoderHandle {
    tx: mpsc::Sender<EncodeRequest>,
}

struct EncodeRequest {
    texts: Vec<String>,
    reply: oneshot::Sender<Result<Vec<Vec<f32>>, String>>,
}

impl EncoderHandle {
    fn spawn(mut encoder: Box<dyn SentenceEncoder>) -> Self {
        let (tx, mut rx) = mpsc::channel::<EncodeRequest>(ENCODER_QUEUE);

        // Encoding is CPU-bound; keep it off the async worker threads.
        tokio::task::spawn_blocking(move || {
            while let Some(request) = rx.blocking_recv() {
                let result = encoder.encode(request.texts);
                // Caller may have given up on the reply; nothing to do then.
                let _ = request.reply.send(result);
            }
            debug!("Encoder task shutting down");
        });

        Self { tx }
    }

    async fn encode(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, EmbedderError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(EncodeRequest { texts, reply })
            .await
            .map_err(|_| EmbedderError::WorkerGone("encoder task stopped".into()))?;

        rx.await
            .map_err(|_| EmbedderError::WorkerGone("encoder task dropped the request".into()))?
            .map_err(EmbedderError::Inference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Encoder producing a constant vector, so tests stay deterministic.
    struct FixedEncoder {
        dimensions: usize,
    }

    impl SentenceEncoder for FixedEncoder {
        fn encode(&mut self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, String> {
            Ok(texts.iter().map(|_| vec![0.5; self.dimensions]).collect())
        }
    }

    fn counting_backend(loads: Arc<AtomicUsize>) -> LocalModelBackend {
        LocalModelBackend::with_loader(8, move || {
            loads.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(FixedEncoder { dimensions: 8 }) as Box<dyn SentenceEncoder>)
        })
    }

    #[tokio::test]
    async fn test_embed_returns_fixed_length_vector() {
        let backend = counting_backend(Arc::new(AtomicUsize::new(0)));

        let vector = backend.embed("hello").await.unwrap();
        assert_eq!(vector.len(), 8);
        assert_eq!(backend.dimensions(), 8);
    }

    #[tokio::test]
    async fn test_concurrent_first_calls_share_one_initialization() {
        let loads = Arc::new(AtomicUsize::new(0));
        let backend = Arc::new(counting_backend(loads.clone()));

        let mut handles = Vec::new();
        for i in 0..16 {
            let backend = backend.clone();
            handles.push(tokio::spawn(
                async move { backend.embed(&format!("text {i}")).await },
            ));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(
            loads.load(Ordering::SeqCst),
            1,
            "all concurrent callers must await the same model load"
        );
    }

    #[tokio::test]
    async fn test_failed_load_is_memoized() {
        let loads = Arc::new(AtomicUsize::new(0));
        let loads_in_loader = loads.clone();
        let backend = LocalModelBackend::with_loader(8, move || {
            loads_in_loader.fetch_add(1, Ordering::SeqCst);
            Err("weights missing".to_string())
        });

        let first = backend.embed("a").await;
        let second = backend.embed("b").await;

        assert!(matches!(first, Err(EmbedderError::ModelLoad(_))));
        assert!(matches!(second, Err(EmbedderError::ModelLoad(_))));
        assert_eq!(
            loads.load(Ordering::SeqCst),
            1,
            "a failed load is not retried within the process"
        );
    }

    #[tokio::test]
    async fn test_empty_string_embeds() {
        let backend = counting_backend(Arc::new(AtomicUsize::new(0)));
        let vector = backend.embed("").await.unwrap();
        assert_eq!(vector.len(), 8);
    }
}
