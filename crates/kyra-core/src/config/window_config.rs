use serde::{Deserialize, Serialize};

use super::defaults;

/// Conversation windows. Three stages, three independent sizes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Prior turns sent to the completion service with the question.
    pub generation_window: usize,
    /// Prior turns folded into the chat layer's contextual query.
    pub contextual_query_window: usize,
    /// Prior turns folded into the contextual retrieval query.
    pub contextual_retrieval_window: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            generation_window: defaults::DEFAULT_GENERATION_WINDOW,
            contextual_query_window: defaults::DEFAULT_CONTEXTUAL_QUERY_WINDOW,
            contextual_retrieval_window: defaults::DEFAULT_CONTEXTUAL_RETRIEVAL_WINDOW,
        }
    }
}
