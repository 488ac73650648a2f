//! Translation port - Interface for advisory utterance translation

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Result of a translation operation
#[derive(Debug, Clone)]
pub struct TranslationResult {
    /// Translated text (English)
    pub text: String,
    /// Source language the service detected, e.g. "ES"
    pub detected_source_language: Option<String>,
}

/// Port for translating learner utterances
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TranslationPort: Send + Sync {
    /// Translate a Spanish utterance into English.
    async fn translate_to_english(
        &self,
        text: &str,
    ) -> Result<TranslationResult, ApplicationError>;

    /// Check if the translation service is reachable
    async fn is_healthy(&self) -> bool;
}
