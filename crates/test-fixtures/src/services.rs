//! Scripted doubles for the completion and vector-search services.

use std::collections::VecDeque;
use std::sync::Mutex;

use kyra_core::errors::{CompletionError, KyraResult, SearchError};
use kyra_core::models::{CompletionRequest, SearchHit};
use kyra_core::traits::{ICompletionService, IVectorSearch};

/// A scored hit with a source URL.
pub fn hit(text: &str, score: f64, source_url: &str) -> SearchHit {
    SearchHit {
        text: text.to_string(),
        score: Some(score),
        source_url: Some(source_url.to_string()),
    }
}

/// A hit the service returned without a score.
pub fn unscored_hit(text: &str) -> SearchHit {
    SearchHit {
        text: text.to_string(),
        score: None,
        source_url: None,
    }
}

/// Completion service replaying a fixed script of replies, one per call.
/// Calls past the end of the script fail.
#[derive(Default)]
pub struct ScriptedCompletion {
    script: Mutex<VecDeque<Result<String, String>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedCompletion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, text: &str) -> Self {
        self.push(Ok(text.to_string()))
    }

    pub fn fail(self, reason: &str) -> Self {
        self.push(Err(reason.to_string()))
    }

    fn push(self, step: Result<String, String>) -> Self {
        self.script.lock().expect("script lock").push_back(step);
        self
    }

    /// Every request received so far, in order.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().expect("requests lock").clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().expect("requests lock").len()
    }
}

impl ICompletionService for ScriptedCompletion {
    fn complete(&self, request: &CompletionRequest) -> KyraResult<String> {
        self.requests
            .lock()
            .expect("requests lock")
            .push(request.clone());
        match self.script.lock().expect("script lock").pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(reason)) => Err(CompletionError::RequestFailed { reason }.into()),
            None => Err(CompletionError::RequestFailed {
                reason: "script exhausted".to_string(),
            }
            .into()),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// One recorded search call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCall {
    pub collection: String,
    pub text: String,
    pub top_k: usize,
}

enum Outcome {
    Hits(Vec<SearchHit>),
    Fail(String),
}

struct Rule {
    collection: String,
    text_contains: Option<String>,
    outcome: Outcome,
}

/// Vector search answering from per-collection rules.
///
/// Rules with a `text_contains` filter take precedence over unfiltered rules
/// for the same collection. Collections without a rule return no hits.
#[derive(Default)]
pub struct ScriptedSearch {
    rules: Vec<Rule>,
    calls: Mutex<Vec<SearchCall>>,
}

impl ScriptedSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hits(mut self, collection: &str, hits: Vec<SearchHit>) -> Self {
        self.rules.push(Rule {
            collection: collection.to_string(),
            text_contains: None,
            outcome: Outcome::Hits(hits),
        });
        self
    }

    /// Hits returned only when the query text contains `needle`.
    pub fn hits_when(mut self, collection: &str, needle: &str, hits: Vec<SearchHit>) -> Self {
        self.rules.push(Rule {
            collection: collection.to_string(),
            text_contains: Some(needle.to_string()),
            outcome: Outcome::Hits(hits),
        });
        self
    }

    pub fn failing(mut self, collection: &str, reason: &str) -> Self {
        self.rules.push(Rule {
            collection: collection.to_string(),
            text_contains: None,
            outcome: Outcome::Fail(reason.to_string()),
        });
        self
    }

    /// Fail only when the query text contains `needle`.
    pub fn failing_when(mut self, collection: &str, needle: &str, reason: &str) -> Self {
        self.rules.push(Rule {
            collection: collection.to_string(),
            text_contains: Some(needle.to_string()),
            outcome: Outcome::Fail(reason.to_string()),
        });
        self
    }

    pub fn calls(&self) -> Vec<SearchCall> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("calls lock").len()
    }

    /// Calls whose query text contains `needle`.
    pub fn calls_containing(&self, needle: &str) -> usize {
        self.calls
            .lock()
            .expect("calls lock")
            .iter()
            .filter(|c| c.text.contains(needle))
            .count()
    }
}

impl IVectorSearch for ScriptedSearch {
    fn query(&self, collection_id: &str, text: &str, top_k: usize) -> KyraResult<Vec<SearchHit>> {
        self.calls.lock().expect("calls lock").push(SearchCall {
            collection: collection_id.to_string(),
            text: text.to_string(),
            top_k,
        });

        let rules = &self.rules;
        let rule = rules
            .iter()
            .find(|r| {
                r.collection == collection_id
                    && r.text_contains.as_deref().is_some_and(|n| text.contains(n))
            })
            .or_else(|| {
                rules
                    .iter()
                    .find(|r| r.collection == collection_id && r.text_contains.is_none())
            });

        match rule.map(|r| &r.outcome) {
            Some(Outcome::Hits(hits)) => Ok(hits.iter().take(top_k).cloned().collect()),
            Some(Outcome::Fail(reason)) => Err(SearchError::QueryFailed {
                collection: collection_id.to_string(),
                reason: reason.clone(),
            }
            .into()),
            None => Ok(Vec::new()),
        }
    }
}
