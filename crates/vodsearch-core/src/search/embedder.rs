//! Embedder trait for text-to-vector conversion.
//!
//! Defines the interface for embedding catalog text into vectors for
//! semantic search. Implementations (e.g., fastembed) live in
//! vodsearch-infra.

use vodsearch_types::error::SearchError;

/// Trait for converting text into embedding vectors.
///
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
/// Implementations live in vodsearch-infra.
pub trait Embedder: Send + Sync {
    /// Embed one or more texts into vectors.
    ///
    /// Returns one vector per input text, in input order. Identical input
    /// with the same model version produces identical vectors.
    fn embed(
        &self,
        texts: &[String],
    ) -> impl std::future::Future<Output = Result<Vec<Vec<f32>>, SearchError>> + Send;

    /// The model name used for embeddings.
    fn model_name(&self) -> &str;

    /// The dimensionality of the output vectors.
    fn dimension(&self) -> usize;
}
