use serde::{Deserialize, Serialize};

use super::defaults;

/// Weighted retrieval configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Hits requested from each collection per query.
    pub top_k: usize,
    /// Pooled nodes kept after sorting.
    pub candidate_limit: usize,
    /// Weight of the best direct-question score.
    pub primary_weight: f64,
    /// Weight of the best context-augmented score.
    pub context_weight: f64,
    /// Score assumed for contextual hits the service did not score.
    pub missing_score: f64,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: defaults::DEFAULT_TOP_K,
            candidate_limit: defaults::DEFAULT_CANDIDATE_LIMIT,
            primary_weight: defaults::DEFAULT_PRIMARY_WEIGHT,
            context_weight: defaults::DEFAULT_CONTEXT_WEIGHT,
            missing_score: defaults::DEFAULT_MISSING_SCORE,
        }
    }
}
