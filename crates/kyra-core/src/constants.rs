/// Assistant persona name used in prompts.
pub const ASSISTANT_NAME: &str = "Kyra";

/// Fixed user-visible reply for a request that could not be answered.
pub const APOLOGY_MESSAGE: &str =
    "I'm having trouble responding right now. Please try again in a moment.";

/// Reason recorded for medical questions answered without knowledge-base evidence.
pub const REASON_NO_EVIDENCE: &str = "medical_question_no_rag";

/// Prefix of the reason recorded for failed requests.
pub const REASON_SYSTEM_ERROR_PREFIX: &str = "system_error";

/// Marker the chat layer places before the current question in a contextual query.
pub const CURRENT_QUESTION_MARKER: &str = "Current question:";
