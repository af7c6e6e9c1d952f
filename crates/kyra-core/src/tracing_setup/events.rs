//! Structured log events for key pipeline operations.
//!
//! Each function emits a `tracing` event with structured fields.

/// Log the outcome of question classification.
pub fn question_classified(label: &str, fell_open: bool) {
    tracing::info!(
        event = "question_classified",
        label = %label,
        fell_open = fell_open,
        "question classified"
    );
}

/// Log the evidence gate decision.
pub fn evidence_gated(use_evidence: bool, blended_score: f64, threshold: f64, sources: usize) {
    tracing::info!(
        event = "evidence_gated",
        use_evidence = use_evidence,
        blended_score = blended_score,
        threshold = threshold,
        sources = sources,
        "evidence gate decided"
    );
}

/// Log a stage degrading to its fallback.
pub fn degradation_triggered(component: &str, failure: &str, fallback: &str) {
    tracing::warn!(
        event = "degradation_triggered",
        component = %component,
        failure = %failure,
        fallback = %fallback,
        "degradation triggered"
    );
}

/// Log a completed answer.
pub fn answer_completed(is_medical: bool, used_evidence: bool, sources: usize, error: bool) {
    tracing::info!(
        event = "answer_completed",
        is_medical = is_medical,
        used_evidence = used_evidence,
        sources = sources,
        error = error,
        "answer completed"
    );
}
