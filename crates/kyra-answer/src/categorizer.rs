//! QuestionCategorizer: analytics label for a question.

use kyra_core::config::CategorizerConfig;
use kyra_core::models::{CategoryKind, ChatMessage, CompletionRequest, QuestionCategory};
use kyra_core::traits::ICompletionService;
use tracing::{debug, warn};

const CATEGORIZER_PROMPT: &str = r#"You are a medical question categorizer. For each question, determine if it's medical/health-related or general conversation.

For MEDICAL questions, return:
- The main category (choose one: Symptoms & Diagnosis, Treatment & Medication, Prevention & Lifestyle)
- If the question is about a specific disease or condition, add it after a comma (e.g. Symptoms & Diagnosis, Diabetes)
- If not about a specific disease/condition, just return the category

For NON-MEDICAL questions, return: General

Available categories:
1. Symptoms & Diagnosis
2. Treatment & Medication
3. Prevention & Lifestyle
4. General

Rules:
- Medical questions include: diseases, conditions, symptoms, treatments, medications, health, medical procedures, etc.
- "What is [disease/condition]?" questions are MEDICAL and should be categorized as "Symptoms & Diagnosis"
- Always return the category first
- If a disease/condition is mentioned, add it after a comma
- If not, just return the category
- Be consistent across similar questions
- Return ONLY the category (and disease/condition if present), nothing else

Examples:
"What is diabetes?" -> "Symptoms & Diagnosis, Diabetes"
"What are the symptoms of diabetes?" -> "Symptoms & Diagnosis, Diabetes"
"How is diabetes treated?" -> "Treatment & Medication, Diabetes"
"How can I prevent diabetes?" -> "Prevention & Lifestyle, Diabetes"
"What medications are used for high blood pressure?" -> "Treatment & Medication, High Blood Pressure"
"What causes migraines?" -> "Symptoms & Diagnosis, Migraines"
"How can I lower my cholesterol naturally?" -> "Prevention & Lifestyle, Cholesterol"
"Tell me a joke" -> "General"
"What's the weather like?" -> "General"
"What is leptospirosis?" -> "Symptoms & Diagnosis, Leptospirosis"

Question: "{question}"
Category:"#;

pub struct QuestionCategorizer<'a> {
    completion: &'a dyn ICompletionService,
    config: CategorizerConfig,
}

impl<'a> QuestionCategorizer<'a> {
    pub fn new(completion: &'a dyn ICompletionService, config: CategorizerConfig) -> Self {
        Self { completion, config }
    }

    /// `None` only when the completion service fails.
    pub fn categorize(&self, question: &str) -> Option<QuestionCategory> {
        let request = CompletionRequest {
            messages: vec![ChatMessage::user(
                CATEGORIZER_PROMPT.replace("{question}", question),
            )],
            model: self.config.model.clone(),
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        match self.completion.complete(&request) {
            Ok(raw) => {
                let category = parse_category(&raw);
                debug!(raw = %raw.trim(), category = %category, "question categorized");
                Some(category)
            }
            Err(e) => {
                warn!(error = %e, "categorization failed");
                None
            }
        }
    }
}

/// Parse `Category[, Condition]`. Output that does not start with a known
/// label is `General`.
pub fn parse_category(raw: &str) -> QuestionCategory {
    let text = raw.trim().trim_matches('"').trim();

    let Some(kind) = CategoryKind::ALL
        .into_iter()
        .find(|k| text.starts_with(k.label()))
    else {
        return QuestionCategory::general();
    };

    let condition = text
        .split_once(',')
        .map(|(_, rest)| rest.trim().trim_end_matches('.').to_string())
        .filter(|c| !c.is_empty());

    QuestionCategory { kind, condition }
}
