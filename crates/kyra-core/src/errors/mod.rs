//! Error handling for Kyra.
//! One error enum per subsystem, `thiserror` only, aggregated into [`KyraError`].

pub mod completion_error;
pub mod config_error;
pub mod embedding_error;
pub mod search_error;

pub use completion_error::CompletionError;
pub use config_error::ConfigError;
pub use embedding_error::EmbeddingError;
pub use search_error::SearchError;

/// Top-level error for every fallible operation in the workspace.
#[derive(Debug, thiserror::Error)]
pub enum KyraError {
    #[error("completion error: {0}")]
    Completion(#[from] CompletionError),

    #[error("search error: {0}")]
    Search(#[from] SearchError),

    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type KyraResult<T> = Result<T, KyraError>;
