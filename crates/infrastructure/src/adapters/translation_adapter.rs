//! Translation adapter - Implements TranslationPort using integration_deepl

use application::{
    error::ApplicationError,
    ports::{TranslationPort, TranslationResult},
};
use async_trait::async_trait;
use domain::value_objects::Language;
use integration_deepl::{DeepLClient, DeepLConfig, TranslationClient, TranslationError};
use tracing::instrument;

/// Adapter for DeepL translation
#[derive(Debug)]
pub struct DeepLTranslationAdapter {
    client: DeepLClient,
}

impl DeepLTranslationAdapter {
    /// Create a new adapter with the given configuration
    pub fn new(config: DeepLConfig) -> Result<Self, ApplicationError> {
        let client =
            DeepLClient::new(config).map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self { client })
    }

    /// Convert translation error to application error
    fn map_error(e: TranslationError) -> ApplicationError {
        match e {
            TranslationError::RateLimitExceeded => ApplicationError::RateLimited,
            TranslationError::AuthenticationFailed => {
                ApplicationError::Configuration(e.to_string())
            }
            other => ApplicationError::Translation(other.to_string()),
        }
    }
}

#[async_trait]
impl TranslationPort for DeepLTranslationAdapter {
    #[instrument(skip(self, text), fields(chars = text.len()))]
    async fn translate_to_english(
        &self,
        text: &str,
    ) -> Result<TranslationResult, ApplicationError> {
        let translation = self
            .client
            .translate(text, Language::Spanish, Language::English)
            .await
            .map_err(Self::map_error)?;

        Ok(TranslationResult {
            text: translation.text,
            detected_source_language: translation.detected_source_language,
        })
    }

    async fn is_healthy(&self) -> bool {
        self.client.is_healthy().await
    }
}
