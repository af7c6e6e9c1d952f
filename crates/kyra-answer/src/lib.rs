//! # kyra-answer
//!
//! The answer pipeline on top of `kyra-retrieval`.
//!
//! ```text
//!   question ──► QuestionClassifier ──► GENERAL ─────────────────┐
//!                       │                                        │
//!                    MEDICAL                                     │
//!                       ▼                                        ▼
//!              WeightedRetriever ──► EvidenceGate ──► ResponseGenerator
//!                                                                │
//!                                                                ▼
//!                                   AnswerResult ◄── SourceFormatter
//! ```
//!
//! [`AnswerOrchestrator`] is the only entry point with external callers.
//! Every stage degrades instead of failing, except generation, whose error
//! becomes the apology response at the orchestrator boundary.

pub mod categorizer;
pub mod classifier;
pub mod formatter;
pub mod generator;
pub mod orchestrator;

pub use categorizer::QuestionCategorizer;
pub use classifier::QuestionClassifier;
pub use formatter::{dedup_preserving_order, FormattedAnswer, SourceFormatter};
pub use generator::{GenerationInput, ResponseGenerator};
pub use orchestrator::{AnswerOrchestrator, AnswerRequest};
