//! # kyra-core
//!
//! Foundation crate for the Kyra answer pipeline.
//! Defines the shared types, service traits, errors, config, tracing setup,
//! and constants. Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;
pub mod tracing_setup;

// Re-export the most commonly used types at the crate root.
pub use config::KyraConfig;
pub use errors::{KyraError, KyraResult};
pub use models::{
    AnswerMetadata, AnswerResult, Attribution, Classification, CombinedEvidence,
    ConversationTurn, RetrievedNode, Role, SearchHit,
};
