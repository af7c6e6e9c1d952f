//! QuestionClassifier: MEDICAL or GENERAL, via a single completion call.

use kyra_core::config::ClassifierConfig;
use kyra_core::models::{ChatMessage, Classification, CompletionRequest};
use kyra_core::traits::ICompletionService;
use kyra_core::tracing_setup::events;
use tracing::debug;

const CLASSIFIER_PROMPT: &str = r#"You are a classifier that determines if a question is medical/health-related or general conversation.

Return only "MEDICAL" or "GENERAL".

Examples:
"Hello" -> GENERAL
"How are you?" -> GENERAL
"What's the weather like?" -> GENERAL
"Tell me a joke" -> GENERAL
"What is diabetes?" -> MEDICAL
"I have a headache, what should I do?" -> MEDICAL
"How to treat high blood pressure?" -> MEDICAL
"What are the symptoms of flu?" -> MEDICAL
"My medication side effects" -> MEDICAL
"Cancer treatment options" -> MEDICAL

Question: "{question}"
Classification:"#;

/// Binary question classifier. Never fails: service errors and answers
/// outside the label set yield the configured fail-open label.
pub struct QuestionClassifier<'a> {
    completion: &'a dyn ICompletionService,
    config: ClassifierConfig,
}

impl<'a> QuestionClassifier<'a> {
    pub fn new(completion: &'a dyn ICompletionService, config: ClassifierConfig) -> Self {
        Self { completion, config }
    }

    pub fn classify(&self, question: &str) -> Classification {
        let request = CompletionRequest {
            messages: vec![ChatMessage::user(prompt_for(question))],
            model: self.config.model.clone(),
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let parsed = match self.completion.complete(&request) {
            Ok(raw) => {
                let label = Classification::from_label(&raw);
                if label.is_none() {
                    debug!(raw = %raw, "classifier answered outside the label set");
                }
                label
            }
            Err(e) => {
                events::degradation_triggered(
                    "classifier",
                    &e.to_string(),
                    self.config.fail_open_label.label(),
                );
                None
            }
        };

        let fell_open = parsed.is_none();
        let label = parsed.unwrap_or(self.config.fail_open_label);
        events::question_classified(label.label(), fell_open);
        label
    }
}

fn prompt_for(question: &str) -> String {
    CLASSIFIER_PROMPT.replace("{question}", question)
}
