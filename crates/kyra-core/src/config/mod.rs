//! Configuration for every pipeline stage.

pub mod collection_config;
pub mod defaults;
pub mod gate_config;
pub mod kyra_config;
pub mod model_config;
pub mod provider_config;
pub mod retrieval_config;
pub mod window_config;

pub use collection_config::{default_collections, CollectionConfig};
pub use gate_config::GateConfig;
pub use kyra_config::KyraConfig;
pub use model_config::{CategorizerConfig, ClassifierConfig, GenerationConfig};
pub use provider_config::ProviderConfig;
pub use retrieval_config::RetrievalConfig;
pub use window_config::WindowConfig;
