use serde::{Deserialize, Serialize};

use super::defaults;

/// Endpoints for the HTTP-backed service providers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// OpenAI-compatible API root (chat completions + embeddings).
    pub openai_base_url: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    pub embedding_model: String,
    /// Chroma server root.
    pub chroma_url: String,
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            openai_base_url: defaults::DEFAULT_OPENAI_BASE_URL.to_string(),
            api_key_env: defaults::DEFAULT_API_KEY_ENV.to_string(),
            embedding_model: defaults::DEFAULT_EMBEDDING_MODEL.to_string(),
            chroma_url: defaults::DEFAULT_CHROMA_URL.to_string(),
            timeout_secs: defaults::DEFAULT_PROVIDER_TIMEOUT_SECS,
        }
    }
}
