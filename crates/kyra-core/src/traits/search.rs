use crate::errors::KyraResult;
use crate::models::SearchHit;

/// Similarity search over pre-embedded knowledge collections.
///
/// Collections are read-only for the life of the process, so one handle may
/// serve concurrent queries.
pub trait IVectorSearch: Send + Sync {
    /// Top-`top_k` hits for `text` in `collection_id`, best first.
    fn query(&self, collection_id: &str, text: &str, top_k: usize) -> KyraResult<Vec<SearchHit>>;
}
