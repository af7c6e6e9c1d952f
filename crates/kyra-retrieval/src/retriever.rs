//! WeightedRetriever: queries every knowledge collection with the current
//! question, then again with a short conversational context, and blends the
//! two best scores.

use kyra_core::config::KyraConfig;
use kyra_core::models::{last_turns, CombinedEvidence, ConversationTurn, RetrievedNode};
use kyra_core::traits::IVectorSearch;
use kyra_core::tracing_setup::events;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::combiner::ScoreWeights;
use crate::domain;

/// Multi-collection retriever. Holds only shared, read-only handles, so one
/// instance can serve concurrent requests.
pub struct WeightedRetriever<'a> {
    search: &'a dyn IVectorSearch,
    collections: Vec<String>,
    allowed_domains: Vec<String>,
    top_k: usize,
    candidate_limit: usize,
    missing_score: f64,
    context_window: usize,
    weights: ScoreWeights,
}

impl<'a> WeightedRetriever<'a> {
    pub fn new(search: &'a dyn IVectorSearch, config: &KyraConfig) -> Self {
        let weights = match ScoreWeights::try_from(&config.retrieval) {
            Ok(weights) => weights,
            Err(e) => {
                events::degradation_triggered(
                    "retriever",
                    &e.to_string(),
                    "weights derived from primary_weight",
                );
                ScoreWeights::from_primary(config.retrieval.primary_weight)
            }
        };
        Self {
            search,
            collections: config.collections.iter().map(|c| c.id.clone()).collect(),
            allowed_domains: config.allowed_domains(),
            top_k: config.retrieval.top_k,
            candidate_limit: config.retrieval.candidate_limit,
            missing_score: config.retrieval.missing_score,
            context_window: config.windows.contextual_retrieval_window,
            weights,
        }
    }

    pub fn weights(&self) -> ScoreWeights {
        self.weights
    }

    /// Retrieve with the configured weights.
    pub fn retrieve(&self, question: &str, history: &[ConversationTurn]) -> CombinedEvidence {
        self.retrieve_weighted(question, history, self.weights)
    }

    /// Retrieve evidence for `question`, letting at most the last few turns of
    /// `history` lift the score of follow-up questions.
    pub fn retrieve_weighted(
        &self,
        question: &str,
        history: &[ConversationTurn],
        weights: ScoreWeights,
    ) -> CombinedEvidence {
        debug!(
            primary = weights.primary(),
            context = weights.context(),
            collections = self.collections.len(),
            "weighted retrieval"
        );

        let mut pooled: Vec<RetrievedNode> = self
            .query_collections(question)
            .into_iter()
            .flat_map(|(collection_id, hits)| {
                hits.into_iter().filter_map(move |hit| {
                    let score = hit.score.filter(|s| s.is_finite() && *s > 0.0)?;
                    Some(RetrievedNode {
                        text: hit.text,
                        score: score.min(1.0),
                        source_url: hit.source_url.unwrap_or_default(),
                        collection_id: collection_id.clone(),
                    })
                })
            })
            .collect();

        if pooled.is_empty() {
            info!("no scored results from any collection");
            return CombinedEvidence::empty();
        }

        let primary_score = pooled.iter().map(|n| n.score).fold(0.0, f64::max);

        // Stable: equal scores keep collection order, then service rank.
        pooled.sort_by(|a, b| b.score.total_cmp(&a.score));
        pooled.truncate(self.candidate_limit);

        let contextual_score = if history.is_empty() {
            0.0
        } else {
            let query = contextual_query(history, question, self.context_window);
            self.best_contextual_score(&query)
        };

        let blended_score = weights.blend(primary_score, contextual_score);

        let mut source_urls: Vec<String> = Vec::new();
        for node in &pooled {
            if domain::is_allowed(&node.source_url, &self.allowed_domains)
                && !source_urls.contains(&node.source_url)
            {
                source_urls.push(node.source_url.clone());
            }
        }

        info!(
            primary_score,
            contextual_score,
            blended_score,
            candidates = pooled.len(),
            allowed_sources = source_urls.len(),
            "weighted retrieval complete"
        );

        CombinedEvidence {
            primary_score,
            contextual_score,
            blended_score,
            candidate_nodes: pooled,
            source_urls,
        }
    }

    /// Hits per collection, in configured collection order. Failed
    /// collections are dropped.
    fn query_collections(&self, text: &str) -> Vec<(String, Vec<kyra_core::SearchHit>)> {
        // Rayon workers do not inherit the caller's span.
        let span = tracing::Span::current();
        self.collections
            .par_iter()
            .filter_map(|collection_id| {
                let _entered = span.enter();
                match self.search.query(collection_id, text, self.top_k) {
                    Ok(hits) => {
                        debug!(collection = %collection_id, hits = hits.len(), "collection queried");
                        Some((collection_id.clone(), hits))
                    }
                    Err(e) => {
                        events::degradation_triggered(
                            &format!("collection:{collection_id}"),
                            &e.to_string(),
                            "skip collection",
                        );
                        None
                    }
                }
            })
            .collect()
    }

    fn best_contextual_score(&self, query: &str) -> f64 {
        let best = self
            .query_collections(query)
            .into_iter()
            .flat_map(|(_, hits)| hits)
            .map(|hit| {
                hit.score
                    .filter(|s| s.is_finite())
                    .unwrap_or(self.missing_score)
                    .clamp(0.0, 1.0)
            })
            .fold(None, |best: Option<f64>, s| Some(best.map_or(s, |b| b.max(s))));
        debug!(contextual_score = ?best, "contextual search complete");
        best.unwrap_or(0.0)
    }
}

/// `Context: <role>: <content> | ... | Current: <question>` over the last
/// `window` turns.
pub fn contextual_query(history: &[ConversationTurn], question: &str, window: usize) -> String {
    let recent: Vec<String> = last_turns(history, window)
        .iter()
        .map(ConversationTurn::labelled)
        .collect();
    format!("Context: {} | Current: {}", recent.join(" | "), question)
}
