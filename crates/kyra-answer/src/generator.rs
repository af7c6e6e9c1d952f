//! ResponseGenerator: builds the conditional system prompt and asks the
//! completion service for the answer.

use kyra_core::config::GenerationConfig;
use kyra_core::constants::{APOLOGY_MESSAGE, ASSISTANT_NAME};
use kyra_core::errors::{CompletionError, KyraResult};
use kyra_core::models::{ChatMessage, CompletionRequest, ConversationTurn};
use kyra_core::traits::ICompletionService;
use kyra_core::tracing_setup::events;
use tracing::{debug, info};

const PERSONA: &str = "\
You are **{name}**, an AI health assistant.
Your mission: deliver clear, empathetic, evidence-based health information
while sounding friendly and conversational.

**Context awareness**
- Read the entire conversation thread before replying.
- If the user follows up with \"Is this serious?\" or similar, use prior messages to
  understand what they mean.

**General chat**
- Respond warmly, keep things light, avoid unnecessary jargon.

**Anything non-medical that is not conversational**
- Respond with \"I'm sorry, I can't help with that. I'm here to help with health questions.\"

**Health questions**
- In the first couple of sentences, mention where the information comes from in a
  smooth conversational way, e.g. \"I'm using the NHS/CDC/WHO websites to answer this question.\"
- Provide up-to-date, evidence-based information (NHS, CDC, WHO, peer-reviewed studies).
- State your limits: you are not a replacement for professional diagnosis or
  treatment. Encourage consulting a qualified clinician for personalised care.
- Flag any red-flag or emergency symptoms (e.g. chest pain, sudden vision loss)
  and advise calling local emergency services or seeing a doctor urgently.
- Keep explanations in plain language; define unfamiliar medical terms.
- Do **not** prescribe specific drugs or doses or create treatment plans.
- If there is user context, use it to tailor your response.
- If the user shows self-harm intent, respond with compassion and give crisis
  hotline information for their region.
";

const EVIDENCE_HEADER: &str = "

**Trusted reference material**
Below are vetted excerpts (primarily NHS and Cancer Research UK).
Use them to support your answer and cite them explicitly when quoted.

";

const EVIDENCE_FOOTER: &str = "

Blend these passages with your broader medical knowledge; do not rely on them
exclusively.
";

const GENERAL_KNOWLEDGE_INSTRUCTION: &str = "
No additional reference documents were provided for this question. Rely on your
general medical knowledge **and** finish with a \"Sources:\" section listing
2-3 authoritative, publicly accessible sites relevant to the topic, e.g.:

Sources:
- NHS.uk - [Condition overview]
- Mayo Clinic - [Condition overview]
- WHO - [Condition overview]
";

/// Everything one generation call needs.
#[derive(Debug, Clone, Copy)]
pub struct GenerationInput<'i> {
    /// Prior turns, already bounded by the caller.
    pub history: &'i [ConversationTurn],
    pub question: &'i str,
    /// Gated evidence body, present only when the gate passed.
    pub evidence_text: Option<&'i str>,
    pub sources: &'i [String],
    pub is_medical: bool,
    pub user_context: Option<&'i str>,
}

pub struct ResponseGenerator<'a> {
    completion: &'a dyn ICompletionService,
    config: GenerationConfig,
}

impl<'a> ResponseGenerator<'a> {
    pub fn new(completion: &'a dyn ICompletionService, config: GenerationConfig) -> Self {
        Self { completion, config }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Generate the answer, surfacing service failures.
    pub fn try_generate(&self, input: &GenerationInput<'_>) -> KyraResult<String> {
        let request = self.build_request(input);
        debug!(
            messages = request.messages.len(),
            with_evidence = input.evidence_text.is_some(),
            sources = input.sources.len(),
            "requesting completion"
        );

        let text = self.completion.complete(&request)?;
        if text.trim().is_empty() {
            return Err(CompletionError::EmptyResponse {
                model: self.config.model.clone(),
            }
            .into());
        }
        info!(chars = text.len(), "response generated");
        Ok(text)
    }

    /// Generate the answer, replacing any failure with the apology message.
    pub fn generate(&self, input: &GenerationInput<'_>) -> String {
        self.try_generate(input).unwrap_or_else(|e| {
            events::degradation_triggered("generator", &e.to_string(), "apology message");
            APOLOGY_MESSAGE.to_string()
        })
    }

    pub fn build_request(&self, input: &GenerationInput<'_>) -> CompletionRequest {
        let mut messages = Vec::with_capacity(input.history.len() + 2);
        messages.push(ChatMessage::system(system_prompt(input)));
        messages.extend(input.history.iter().map(ChatMessage::from));
        messages.push(ChatMessage::user(input.question));

        CompletionRequest {
            messages,
            model: self.config.model.clone(),
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        }
    }
}

/// Persona plus exactly one augmentation branch, plus user background for
/// medical questions.
pub fn system_prompt(input: &GenerationInput<'_>) -> String {
    let mut prompt = PERSONA.replace("{name}", ASSISTANT_NAME);

    match input.evidence_text {
        Some(evidence) => {
            prompt.push_str(EVIDENCE_HEADER);
            prompt.push_str(evidence);
            prompt.push_str(EVIDENCE_FOOTER);
        }
        None if input.is_medical => prompt.push_str(GENERAL_KNOWLEDGE_INSTRUCTION),
        None => {}
    }

    if input.is_medical {
        if let Some(context) = input.user_context.filter(|c| !c.trim().is_empty()) {
            prompt.push_str("\n\n**User background/context:**\n");
            prompt.push_str(context);
            prompt.push('\n');
        }
    }

    prompt
}
