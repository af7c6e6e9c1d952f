//! # kyra-retrieval
//!
//! Evidence side of the answer pipeline: query every knowledge collection,
//! blend direct and context-augmented scores, then decide whether the
//! retrieved passages are trustworthy enough to quote.
//!
//! ## Architecture
//!
//! ```text
//! WeightedRetriever
//! ├── primary query    (question → every collection, top-k, pooled)
//! ├── contextual query (last turns + question → every collection, max score)
//! ├── ScoreCombiner    (primary * wp + contextual * wc)
//! └── domain filter    (allow-listed source hosts)
//! EvidenceGate
//! ├── allow-listed source present?
//! ├── blended >= threshold?
//! └── passage cut (node score >= factor * threshold)
//! ```

pub mod combiner;
pub mod domain;
pub mod gate;
pub mod retriever;

pub use combiner::ScoreWeights;
pub use gate::{EvidenceGate, GateDecision, NoEvidenceReason};
pub use retriever::WeightedRetriever;
