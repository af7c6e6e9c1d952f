//! Retrieval output types: raw search hits, normalised nodes, and the combined
//! evidence handed to the gate.

use serde::{Deserialize, Serialize};

/// A raw row returned by the vector search service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub text: String,
    /// Similarity in [0.0, 1.0]. `None` when the service did not score the row.
    pub score: Option<f64>,
    pub source_url: Option<String>,
}

/// A scored passage pulled from one knowledge collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedNode {
    pub text: String,
    pub score: f64,
    /// Empty when the document carried no source metadata.
    pub source_url: String,
    pub collection_id: String,
}

/// Everything one weighted retrieval produced.
///
/// `blended_score = primary_weight * primary_score + context_weight * contextual_score`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CombinedEvidence {
    pub primary_score: f64,
    pub contextual_score: f64,
    pub blended_score: f64,
    /// Sorted by score, descending.
    pub candidate_nodes: Vec<RetrievedNode>,
    /// Allow-listed source URLs of the candidates, unique, first-seen order.
    pub source_urls: Vec<String>,
}

impl CombinedEvidence {
    /// Evidence for a retrieval that found nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.candidate_nodes.is_empty()
    }
}
