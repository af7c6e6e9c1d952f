//! # kyra-providers
//!
//! Network implementations of the `kyra-core` service traits:
//! - [`OpenAiCompletion`]: `ICompletionService` over an OpenAI-compatible chat API
//! - [`OpenAiEmbedder`]: `IEmbeddingProvider` over the embeddings API
//! - [`ChromaSearch`]: `IVectorSearch` over a Chroma server
//!
//! The traits are synchronous; each request runs on a short-lived
//! current-thread tokio runtime. No provider retries.

mod http;

pub mod chroma;
pub mod openai_completion;
pub mod openai_embedder;

pub use chroma::ChromaSearch;
pub use http::api_key_from_env;
pub use openai_completion::OpenAiCompletion;
pub use openai_embedder::OpenAiEmbedder;
