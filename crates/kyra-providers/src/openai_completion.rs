//! Chat completions over an OpenAI-compatible API.

use std::time::Duration;

use kyra_core::config::ProviderConfig;
use kyra_core::errors::{CompletionError, ConfigError, KyraResult};
use kyra_core::models::{ChatMessage, CompletionRequest};
use kyra_core::traits::ICompletionService;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::http;

pub struct OpenAiCompletion {
    endpoint: String,
    api_key: String,
    timeout: Duration,
}

#[derive(Serialize)]
struct ChatRequest<'r> {
    model: &'r str,
    messages: &'r [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiCompletion {
    pub fn new(base_url: &str, api_key: String, timeout: Duration) -> Self {
        Self {
            endpoint: http::endpoint(base_url, "chat/completions"),
            api_key,
            timeout,
        }
    }

    /// Build from config, reading the API key from `config.api_key_env`.
    pub fn from_config(config: &ProviderConfig) -> Result<Self, ConfigError> {
        let api_key = http::api_key_from_env(&config.api_key_env)?;
        Ok(Self::new(
            &config.openai_base_url,
            api_key,
            Duration::from_secs(config.timeout_secs),
        ))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn send(&self, body: String) -> Result<String, CompletionError> {
        let failed = |reason: String| CompletionError::RequestFailed { reason };
        let client = http::client(self.timeout).map_err(failed)?;

        http::block_on(async {
            let response = client
                .post(&self.endpoint)
                .bearer_auth(&self.api_key)
                .header("Content-Type", "application/json")
                .body(body)
                .send()
                .await
                .map_err(|e| CompletionError::RequestFailed {
                    reason: format!("HTTP error: {e}"),
                })?;

            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            if !status.is_success() {
                return Err(CompletionError::ServiceStatus {
                    status: status.as_u16(),
                    body: text,
                });
            }
            Ok(text)
        })
        .map_err(failed)?
    }
}

/// Content of the first choice of a chat completion response body.
pub fn parse_chat_response(body: &str, model: &str) -> Result<String, CompletionError> {
    let response: ChatResponse =
        serde_json::from_str(body).map_err(|e| CompletionError::MalformedResponse {
            reason: format!("JSON parse error: {e}"),
        })?;
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| CompletionError::EmptyResponse {
            model: model.to_string(),
        })
}

impl ICompletionService for OpenAiCompletion {
    fn complete(&self, request: &CompletionRequest) -> KyraResult<String> {
        let body = serde_json::to_string(&ChatRequest {
            model: &request.model,
            messages: &request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        })?;
        debug!(model = %request.model, messages = request.messages.len(), "chat completion request");

        let raw = self.send(body)?;
        Ok(parse_chat_response(&raw, &request.model)?)
    }

    fn name(&self) -> &str {
        "openai-chat"
    }
}
