//! The terminal artifact of the pipeline and what can be derived from it.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::constants::{APOLOGY_MESSAGE, REASON_NO_EVIDENCE, REASON_SYSTEM_ERROR_PREFIX};

static MARKDOWN_LINK_TARGET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\((https?://[^\s)]+)\)").expect("link target regex is valid")
});

/// Where the cited sources of an answer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribution {
    /// Non-medical answer, nothing to attribute.
    #[default]
    None,
    /// Backed by passages from the curated collections.
    KnowledgeBase,
    /// Medical answer from the model's general knowledge.
    GeneralKnowledge,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnswerMetadata {
    pub is_medical: bool,
    pub used_evidence: bool,
    pub blended_score: f64,
    pub sources_count: usize,
    pub conversation_length: usize,
    pub model_used: String,
    pub attribution: Attribution,
    pub error: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerResult {
    pub response_text: String,
    /// Unique, in citation order.
    pub sources: Vec<String>,
    pub metadata: AnswerMetadata,
}

impl AnswerResult {
    /// The fixed apology reply for a request that failed somewhere in the pipeline.
    pub fn failure(reason: impl Into<String>) -> Self {
        Self {
            response_text: APOLOGY_MESSAGE.to_string(),
            sources: Vec::new(),
            metadata: AnswerMetadata {
                error: true,
                error_reason: Some(reason.into()),
                ..AnswerMetadata::default()
            },
        }
    }

    pub fn is_error(&self) -> bool {
        self.metadata.error
    }

    /// Review record for questions the knowledge base could not answer.
    ///
    /// Failed requests and medical answers produced without evidence yield a
    /// record; everything else yields `None`.
    pub fn unanswered_query(&self, question: &str) -> Option<UnansweredQuery> {
        if self.metadata.error {
            let detail = self.metadata.error_reason.as_deref().unwrap_or("unknown");
            return Some(UnansweredQuery {
                text: question.to_string(),
                reason: format!("{REASON_SYSTEM_ERROR_PREFIX}: {detail}"),
                score: None,
                sources: None,
                recorded_at: Utc::now(),
            });
        }

        if !self.metadata.is_medical || self.metadata.used_evidence {
            return None;
        }

        let links = cited_links(&self.response_text);
        Some(UnansweredQuery {
            text: question.to_string(),
            reason: REASON_NO_EVIDENCE.to_string(),
            score: Some(self.metadata.blended_score),
            sources: (!links.is_empty()).then_some(links),
            recorded_at: Utc::now(),
        })
    }
}

/// A question flagged for knowledge-base review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnansweredQuery {
    pub text: String,
    pub reason: String,
    pub score: Option<f64>,
    pub sources: Option<Vec<String>>,
    pub recorded_at: DateTime<Utc>,
}

/// Targets of every markdown link in `text`, in order of appearance.
pub fn cited_links(text: &str) -> Vec<String> {
    MARKDOWN_LINK_TARGET
        .captures_iter(text)
        .filter_map(|c| c.get(1).map(|m| m.as_str().to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn medical_without_evidence(text: &str) -> AnswerResult {
        AnswerResult {
            response_text: text.to_string(),
            sources: vec![],
            metadata: AnswerMetadata {
                is_medical: true,
                blended_score: 0.21,
                ..AnswerMetadata::default()
            },
        }
    }

    #[test]
    fn failure_carries_apology_and_flag() {
        let result = AnswerResult::failure("timeout");
        assert_eq!(result.response_text, APOLOGY_MESSAGE);
        assert!(result.sources.is_empty());
        assert!(result.is_error());
        assert_eq!(result.metadata.error_reason.as_deref(), Some("timeout"));
    }

    #[test]
    fn unanswered_for_medical_without_evidence_extracts_links() {
        let result = medical_without_evidence(
            "Answer.\n- [NHS.uk - Flu](https://www.nhs.uk/conditions/flu/)\n- WHO",
        );
        let record = result.unanswered_query("What is flu?").unwrap();
        assert_eq!(record.reason, REASON_NO_EVIDENCE);
        assert_eq!(record.score, Some(0.21));
        assert_eq!(
            record.sources,
            Some(vec!["https://www.nhs.uk/conditions/flu/".to_string()])
        );
    }

    #[test]
    fn unanswered_without_links_has_no_sources() {
        let record = medical_without_evidence("plain")
            .unanswered_query("q")
            .unwrap();
        assert!(record.sources.is_none());
    }

    #[test]
    fn unanswered_for_failure_records_reason() {
        let record = AnswerResult::failure("boom").unanswered_query("q").unwrap();
        assert_eq!(record.reason, "system_error: boom");
        assert!(record.score.is_none());
    }

    #[test]
    fn no_record_for_general_or_evidence_backed() {
        let mut result = medical_without_evidence("x");
        result.metadata.used_evidence = true;
        assert!(result.unanswered_query("q").is_none());

        result.metadata.used_evidence = false;
        result.metadata.is_medical = false;
        assert!(result.unanswered_query("q").is_none());
    }

    #[test]
    fn metadata_serializes_without_absent_reason() {
        let json = serde_json::to_value(AnswerMetadata::default()).unwrap();
        assert!(json.get("error_reason").is_none());
        assert_eq!(json["attribution"], "none");
    }
}
