use crate::errors::KyraResult;

/// Embedding generation provider.
pub trait IEmbeddingProvider: Send + Sync {
    /// Embed a single text, returning a vector of floats.
    fn embed(&self, text: &str) -> KyraResult<Vec<f32>>;

    /// Human-readable provider name.
    fn name(&self) -> &str;
}
