//! Inference adapter - Implements InferencePort using ai_core

use ai_core::{InferenceConfig, InferenceEngine, InferenceRequest, OpenAiChatEngine};
use application::{
    error::ApplicationError,
    ports::{InferencePort, InferenceResult},
};
use async_trait::async_trait;
use domain::ChatMessage;
use tracing::{debug, instrument};

/// Adapter for OpenAI-compatible chat completion
#[derive(Debug)]
pub struct OpenAiInferenceAdapter {
    engine: OpenAiChatEngine,
    max_tokens: u32,
}

impl OpenAiInferenceAdapter {
    /// Create a new adapter with the given configuration
    pub fn new(config: InferenceConfig) -> Result<Self, ApplicationError> {
        let max_tokens = config.max_tokens;
        let engine = OpenAiChatEngine::new(config)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self { engine, max_tokens })
    }

    /// Convert ai_core error to application error
    fn map_error(e: ai_core::InferenceError) -> ApplicationError {
        match e {
            ai_core::InferenceError::RateLimited => ApplicationError::RateLimited,
            ai_core::InferenceError::ConnectionFailed(msg) => {
                ApplicationError::Inference(format!("Connection failed: {msg}"))
            }
            ai_core::InferenceError::Timeout(ms) => {
                ApplicationError::Inference(format!("Timeout after {ms}ms"))
            }
            other => ApplicationError::Inference(other.to_string()),
        }
    }
}

#[async_trait]
impl InferencePort for OpenAiInferenceAdapter {
    #[instrument(skip(self, history), fields(history_len = history.len()))]
    async fn generate_with_history(
        &self,
        history: &[ChatMessage],
    ) -> Result<InferenceResult, ApplicationError> {
        let request = InferenceRequest::from_history(history).with_max_tokens(self.max_tokens);

        let response = self
            .engine
            .generate(request)
            .await
            .map_err(Self::map_error)?;

        debug!(
            model = %response.model,
            tokens = ?response.usage.as_ref().map(|u| u.total_tokens),
            "Inference response received"
        );

        Ok(InferenceResult {
            content: response.content,
            model: response.model,
            tokens_used: response.usage.map(|u| u.completion_tokens),
        })
    }

    async fn is_healthy(&self) -> bool {
        self.engine.health_check().await.unwrap_or(false)
    }

    fn current_model(&self) -> String {
        self.engine.default_model().to_string()
    }
}
