//! AnswerOrchestrator: the single entry point of the answer pipeline.
//!
//! ```text
//! START → CLASSIFY ─┬─ MEDICAL ─► RETRIEVE → GATE ─┬─► GENERATE → FORMAT → DONE
//!                   └─ GENERAL ────────────────────┘
//! ```

use kyra_core::config::{KyraConfig, WindowConfig};
use kyra_core::constants::CURRENT_QUESTION_MARKER;
use kyra_core::errors::KyraResult;
use kyra_core::models::{last_turns, AnswerMetadata, AnswerResult, ConversationTurn};
use kyra_core::traits::{ICompletionService, IVectorSearch};
use kyra_core::tracing_setup::events;
use kyra_retrieval::{EvidenceGate, GateDecision, WeightedRetriever};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, info_span};
use uuid::Uuid;

use crate::classifier::QuestionClassifier;
use crate::formatter::SourceFormatter;
use crate::generator::{GenerationInput, ResponseGenerator};

/// One question as the chat layer hands it over.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnswerRequest {
    /// The question, possibly wrapped in conversational context.
    pub query: String,
    #[serde(default)]
    pub history: Vec<ConversationTurn>,
    /// The bare question, without context.
    #[serde(default)]
    pub original_query: Option<String>,
    #[serde(default)]
    pub user_context: Option<String>,
}

impl AnswerRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    /// Build a request from a new message and the stored conversation, with
    /// the default windows.
    pub fn from_history(
        message: &str,
        history: &[ConversationTurn],
        user_context: Option<String>,
    ) -> Self {
        Self::from_history_windowed(message, history, user_context, &WindowConfig::default())
    }

    /// The query becomes `Previous conversation:\n<turns>\n\nCurrent question: <message>`
    /// when there is history, and the bare message otherwise.
    pub fn from_history_windowed(
        message: &str,
        history: &[ConversationTurn],
        user_context: Option<String>,
        windows: &WindowConfig,
    ) -> Self {
        let history = last_turns(history, windows.generation_window).to_vec();

        let query = if history.is_empty() {
            message.to_string()
        } else {
            let context: Vec<String> = last_turns(&history, windows.contextual_query_window)
                .iter()
                .map(ConversationTurn::labelled)
                .collect();
            format!(
                "Previous conversation:\n{}\n\n{CURRENT_QUESTION_MARKER} {message}",
                context.join("\n")
            )
        };

        Self {
            query,
            history,
            original_query: Some(message.to_string()),
            user_context,
        }
    }
}

/// Borrows the shared service handles and configuration; holds no per-request
/// state, so one orchestrator can serve concurrent requests.
pub struct AnswerOrchestrator<'a> {
    completion: &'a dyn ICompletionService,
    search: &'a dyn IVectorSearch,
    config: &'a KyraConfig,
    formatter: SourceFormatter,
}

impl<'a> AnswerOrchestrator<'a> {
    pub fn new(
        completion: &'a dyn ICompletionService,
        search: &'a dyn IVectorSearch,
        config: &'a KyraConfig,
    ) -> Self {
        Self {
            completion,
            search,
            config,
            formatter: SourceFormatter::new(),
        }
    }

    pub fn answer_request(&self, request: &AnswerRequest) -> AnswerResult {
        self.answer(
            &request.query,
            &request.history,
            request.original_query.as_deref(),
            request.user_context.as_deref(),
        )
    }

    /// Answer one question. Never fails: any error becomes the apology
    /// response with `metadata.error` set.
    pub fn answer(
        &self,
        query: &str,
        history: &[ConversationTurn],
        original_query: Option<&str>,
        user_context: Option<&str>,
    ) -> AnswerResult {
        let request_id = Uuid::new_v4();
        let span = info_span!("answer", %request_id);
        let _guard = span.enter();

        let question = current_question(query, original_query);
        let history = last_turns(history, self.config.windows.generation_window);
        debug!(question = %question, history = history.len(), "answering");

        let result = match self.run(question, history, user_context) {
            Ok(result) => result,
            Err(e) => {
                error!(error = %e, "answer pipeline failed");
                AnswerResult::failure(e.to_string())
            }
        };

        events::answer_completed(
            result.metadata.is_medical,
            result.metadata.used_evidence,
            result.sources.len(),
            result.metadata.error,
        );
        result
    }

    fn run(
        &self,
        question: &str,
        history: &[ConversationTurn],
        user_context: Option<&str>,
    ) -> KyraResult<AnswerResult> {
        let mut sources: Vec<String> = Vec::new();
        let mut evidence_text: Option<String> = None;
        let mut blended_score = 0.0;

        let classifier = QuestionClassifier::new(self.completion, self.config.classifier.clone());
        let is_medical = classifier.classify(question).is_medical();

        if is_medical {
            let evidence = WeightedRetriever::new(self.search, self.config).retrieve(question, history);
            blended_score = evidence.blended_score;

            match EvidenceGate::new(self.config.gate.clone()).decide(&evidence) {
                GateDecision::UseEvidence { evidence_text: text } => evidence_text = Some(text),
                GateDecision::NoEvidence { reason } => debug!(?reason, "answering without evidence"),
            }
            sources = evidence.source_urls;
        }

        let generator = ResponseGenerator::new(self.completion, self.config.generation.clone());
        let response = generator.try_generate(&GenerationInput {
            history,
            question,
            evidence_text: evidence_text.as_deref(),
            sources: &sources,
            is_medical,
            user_context,
        })?;

        let mut metadata = AnswerMetadata {
            is_medical,
            used_evidence: evidence_text.is_some(),
            blended_score,
            conversation_length: history.len(),
            model_used: generator.model().to_string(),
            ..AnswerMetadata::default()
        };
        let formatted = self.formatter.format(&response, &sources, &metadata);
        metadata.sources_count = formatted.sources.len();
        metadata.attribution = formatted.attribution;

        info!(
            is_medical,
            used_evidence = metadata.used_evidence,
            blended_score,
            sources = metadata.sources_count,
            "answer ready"
        );

        Ok(AnswerResult {
            response_text: formatted.text,
            sources: formatted.sources,
            metadata,
        })
    }
}

/// The bare question: `original_query` when given, else the text after the
/// last current-question marker in `query`, else `query` itself.
pub fn current_question<'q>(query: &'q str, original_query: Option<&'q str>) -> &'q str {
    if let Some(original) = original_query.filter(|q| !q.trim().is_empty()) {
        return original;
    }
    query
        .rfind(CURRENT_QUESTION_MARKER)
        .map(|i| query[i + CURRENT_QUESTION_MARKER.len()..].trim())
        .filter(|q| !q.is_empty())
        .unwrap_or(query)
}
