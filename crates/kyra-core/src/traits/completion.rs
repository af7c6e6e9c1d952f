use crate::errors::KyraResult;
use crate::models::CompletionRequest;

/// Chat-style text completion.
pub trait ICompletionService: Send + Sync {
    /// Run one completion and return the generated text.
    fn complete(&self, request: &CompletionRequest) -> KyraResult<String>;

    /// Human-readable service name.
    fn name(&self) -> &str;
}
