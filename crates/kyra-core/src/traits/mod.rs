pub mod completion;
pub mod embedding;
pub mod search;

pub use completion::ICompletionService;
pub use embedding::IEmbeddingProvider;
pub use search::IVectorSearch;
