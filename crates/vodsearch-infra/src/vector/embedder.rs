//! FastEmbed-based local embedding generator.
//!
//! Implements the `Embedder` trait from `vodsearch-core` using fastembed's
//! BGESmallENV15 model (384 dimensions) with ONNX runtime inference.
//! Model load and inference are CPU-bound and run on the blocking pool so
//! the async loop never stalls on them.

use std::sync::{Arc, Mutex};

use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};

use vodsearch_core::search::embedder::Embedder;
use vodsearch_types::error::SearchError;

/// BGESmallENV15 embedding dimension.
pub const EMBEDDING_DIMENSION: usize = 384;

const MODEL_NAME: &str = "BAAI/bge-small-en-v1.5";

/// Local fastembed text embedder.
pub struct FastEmbedder {
    model: Arc<Mutex<TextEmbedding>>,
}

impl FastEmbedder {
    /// Load the embedding model, downloading the ONNX weights on first
    /// use. Blocking; call from the blocking pool during startup.
    pub fn load() -> Result<Self, SearchError> {
        let model = TextEmbedding::try_new(
            InitOptions::new(EmbeddingModel::BGESmallENV15).with_show_download_progress(false),
        )
        .map_err(|e| SearchError::Provider(format!("failed to load embedding model: {e}")))?;

        tracing::debug!(
            model = MODEL_NAME,
            dimension = EMBEDDING_DIMENSION,
            "embedding model loaded"
        );
        Ok(Self {
            model: Arc::new(Mutex::new(model)),
        })
    }
}

impl Embedder for FastEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, SearchError> {
        let texts = texts.to_vec();
        let model = Arc::clone(&self.model);

        tokio::task::spawn_blocking(move || {
            let mut model = model
                .lock()
                .map_err(|_| SearchError::Provider("embedding model lock poisoned".to_string()))?;
            model
                .embed(texts, None)
                .map_err(|e| SearchError::Provider(e.to_string()))
        })
        .await
        .map_err(|e| SearchError::Provider(format!("embedding task failed: {e}")))?
    }

    fn model_name(&self) -> &str {
        MODEL_NAME
    }

    fn dimension(&self) -> usize {
        EMBEDDING_DIMENSION
    }
}
