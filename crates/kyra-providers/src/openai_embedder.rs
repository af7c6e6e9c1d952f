//! Query embeddings over an OpenAI-compatible embeddings API.

use std::time::Duration;

use kyra_core::config::ProviderConfig;
use kyra_core::errors::{ConfigError, EmbeddingError, KyraResult};
use kyra_core::traits::IEmbeddingProvider;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::http;

pub struct OpenAiEmbedder {
    endpoint: String,
    api_key: String,
    model: String,
    timeout: Duration,
}

#[derive(Serialize)]
struct EmbedRequest<'r> {
    model: &'r str,
    input: &'r str,
}

#[derive(Deserialize)]
struct EmbedResponse {
    data: Vec<EmbedData>,
}

#[derive(Deserialize)]
struct EmbedData {
    embedding: Vec<f32>,
}

impl OpenAiEmbedder {
    pub fn new(base_url: &str, api_key: String, model: impl Into<String>, timeout: Duration) -> Self {
        Self {
            endpoint: http::endpoint(base_url, "embeddings"),
            api_key,
            model: model.into(),
            timeout,
        }
    }

    pub fn from_config(config: &ProviderConfig) -> Result<Self, ConfigError> {
        let api_key = http::api_key_from_env(&config.api_key_env)?;
        Ok(Self::new(
            &config.openai_base_url,
            api_key,
            config.embedding_model.clone(),
            Duration::from_secs(config.timeout_secs),
        ))
    }

    fn send(&self, body: String) -> Result<String, EmbeddingError> {
        let failed = |reason: String| EmbeddingError::InferenceFailed { reason };
        let client = http::client(self.timeout).map_err(failed)?;

        http::block_on(async {
            let response = client
                .post(&self.endpoint)
                .bearer_auth(&self.api_key)
                .header("Content-Type", "application/json")
                .body(body)
                .send()
                .await
                .map_err(|e| EmbeddingError::InferenceFailed {
                    reason: format!("HTTP error: {e}"),
                })?;

            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            if !status.is_success() {
                return Err(EmbeddingError::InferenceFailed {
                    reason: format!("API returned {status}: {text}"),
                });
            }
            Ok(text)
        })
        .map_err(failed)?
    }
}

/// First embedding vector in an embeddings response body.
pub fn parse_embedding_response(body: &str) -> Result<Vec<f32>, EmbeddingError> {
    let response: EmbedResponse =
        serde_json::from_str(body).map_err(|e| EmbeddingError::InferenceFailed {
            reason: format!("JSON parse error: {e}"),
        })?;
    response
        .data
        .into_iter()
        .next()
        .map(|d| d.embedding)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| EmbeddingError::InferenceFailed {
            reason: "empty response".to_string(),
        })
}

impl IEmbeddingProvider for OpenAiEmbedder {
    fn embed(&self, text: &str) -> KyraResult<Vec<f32>> {
        let body = serde_json::to_string(&EmbedRequest {
            model: &self.model,
            input: text,
        })?;
        let raw = self.send(body)?;
        let embedding = parse_embedding_response(&raw)?;
        debug!(dimensions = embedding.len(), "query embedded");
        Ok(embedding)
    }

    fn name(&self) -> &str {
        &self.model
    }
}
