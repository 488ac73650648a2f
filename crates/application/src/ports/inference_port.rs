//! Inference port - Interface for chat-completion generation

use async_trait::async_trait;
use domain::ChatMessage;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Result of an inference operation
#[derive(Debug, Clone)]
pub struct InferenceResult {
    /// Generated text
    pub content: String,
    /// Model that produced the text
    pub model: String,
    /// Completion tokens consumed, if reported
    pub tokens_used: Option<u32>,
}

/// Port for chat-completion inference
#[cfg_attr(test, automock)]
#[async_trait]
pub trait InferencePort: Send + Sync {
    /// Generate a reply over the full ordered conversation history.
    ///
    /// The history is the conversation snapshot, system prompt first.
    async fn generate_with_history(
        &self,
        history: &[ChatMessage],
    ) -> Result<InferenceResult, ApplicationError>;

    /// Check if the inference backend is reachable
    async fn is_healthy(&self) -> bool;

    /// Model identifier in use
    fn current_model(&self) -> String;
}
