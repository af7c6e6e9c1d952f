//! Value types shared by every stage of the answer pipeline.

pub mod answer;
pub mod classification;
pub mod completion;
pub mod conversation;
pub mod evidence;

pub use answer::{AnswerMetadata, AnswerResult, Attribution, UnansweredQuery};
pub use classification::{CategoryKind, Classification, QuestionCategory};
pub use completion::{ChatMessage, CompletionRequest, MessageRole};
pub use conversation::{last_turns, ConversationTurn, Role};
pub use evidence::{CombinedEvidence, RetrievedNode, SearchHit};
