//! OpenAI chat-completions client implementation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::config::InferenceConfig;
use crate::error::InferenceError;
use crate::ports::{InferenceEngine, InferenceRequest, InferenceResponse, TokenUsage};

/// Chat-completion engine backed by the OpenAI API
pub struct OpenAiChatEngine {
    client: Client,
    config: InferenceConfig,
}

impl std::fmt::Debug for OpenAiChatEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiChatEngine")
            .field("base_url", &self.config.base_url)
            .field("default_model", &self.config.default_model)
            .finish_non_exhaustive()
    }
}

impl OpenAiChatEngine {
    /// Create a new engine
    ///
    /// # Errors
    ///
    /// Returns `InferenceError::Configuration` if the configuration is
    /// invalid, or `ConnectionFailed` if the HTTP client cannot be built.
    pub fn new(config: InferenceConfig) -> Result<Self, InferenceError> {
        config.validate().map_err(InferenceError::Configuration)?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| InferenceError::ConnectionFailed(e.to_string()))?;

        info!(
            base_url = %config.base_url,
            model = %config.default_model,
            "Initialized chat-completion engine"
        );

        Ok(Self { client, config })
    }

    /// Get the API key
    fn api_key(&self) -> &str {
        self.config.api_key.as_deref().unwrap_or_default()
    }

    /// Build the API URL for a given endpoint
    fn api_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url,
            endpoint.trim_start_matches('/')
        )
    }

    /// Get the model to use for a request
    fn resolve_model<'a>(&'a self, request: &'a InferenceRequest) -> &'a str {
        request
            .model
            .as_deref()
            .unwrap_or(&self.config.default_model)
    }
}

/// OpenAI-format chat request
#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<WireMessage>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct WireMessage {
    role: String,
    content: String,
}

/// OpenAI-format chat response
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    model: String,
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<WireUsage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct WireUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

/// OpenAI API error response
#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
    code: Option<String>,
}

#[async_trait]
impl InferenceEngine for OpenAiChatEngine {
    #[instrument(skip(self, request), fields(model = %self.resolve_model(&request), msg_count = request.messages.len()))]
    async fn generate(
        &self,
        request: InferenceRequest,
    ) -> Result<InferenceResponse, InferenceError> {
        let model = self.resolve_model(&request).to_string();

        let wire_request = ChatCompletionRequest {
            model,
            messages: request
                .messages
                .iter()
                .map(|m| WireMessage {
                    role: m.role.clone(),
                    content: m.content.clone(),
                })
                .collect(),
            max_tokens: request.max_tokens.unwrap_or(self.config.max_tokens),
            temperature: request.temperature.or(Some(self.config.temperature)),
        };

        debug!("Sending chat-completion request");

        let response = self
            .client
            .post(self.api_url("chat/completions"))
            .bearer_auth(self.api_key())
            .json(&wire_request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "Completion request failed");

            if let Ok(api_error) = serde_json::from_str::<ApiError>(&body) {
                return match api_error.error.code.as_deref() {
                    Some("rate_limit_exceeded") => Err(InferenceError::RateLimited),
                    Some("model_not_found") => Err(InferenceError::ModelNotAvailable(
                        self.config.default_model.clone(),
                    )),
                    _ => Err(InferenceError::ServerError(api_error.error.message)),
                };
            }

            return Err(InferenceError::ServerError(format!(
                "Status {status}: {body}"
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| InferenceError::InvalidResponse(e.to_string()))?;

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| InferenceError::InvalidResponse("No choices in response".to_string()))?;

        let usage = completion.usage.map(|u| TokenUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        debug!(tokens = ?usage, "Completion received");

        Ok(InferenceResponse {
            content: choice.message.content,
            model: completion.model,
            usage,
            finish_reason: choice.finish_reason,
        })
    }

    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<bool, InferenceError> {
        let response = self
            .client
            .get(self.api_url("models"))
            .bearer_auth(self.api_key())
            .timeout(Duration::from_secs(5))
            .send()
            .await;

        match response {
            Ok(resp) => Ok(resp.status().is_success()),
            Err(e) if e.is_timeout() || e.is_connect() => Ok(false),
            Err(e) => Err(InferenceError::RequestFailed(e.to_string())),
        }
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> InferenceConfig {
        InferenceConfig::default().with_api_key("test-key")
    }

    #[test]
    fn config_creates_correct_urls() {
        let engine = OpenAiChatEngine::new(test_config()).unwrap();

        assert_eq!(
            engine.api_url("chat/completions"),
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(
            engine.api_url("/models"),
            "https://api.openai.com/v1/models"
        );
    }

    #[test]
    fn default_model_comes_from_config() {
        let engine = OpenAiChatEngine::new(test_config()).unwrap();
        assert_eq!(engine.default_model(), "gpt-4o-mini");
    }

    #[test]
    fn new_fails_without_api_key() {
        let result = OpenAiChatEngine::new(InferenceConfig::default());
        assert!(matches!(result, Err(InferenceError::Configuration(_))));
    }

    #[test]
    fn request_model_overrides_default() {
        let engine = OpenAiChatEngine::new(test_config()).unwrap();
        let req = InferenceRequest::simple("Hola").with_model("gpt-4o");
        assert_eq!(engine.resolve_model(&req), "gpt-4o");
    }
}
