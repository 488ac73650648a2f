//! DeepL translation client
//!
//! HTTP client for the DeepL REST API.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use domain::value_objects::Language;

use crate::models::{ErrorResponse, TranslateResponse, Translation};

/// Translation client errors
#[derive(Debug, Error)]
pub enum TranslationError {
    /// Connection to the translation service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the translation service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse response from translation service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Nothing to translate
    #[error("Cannot translate empty text")]
    EmptyText,

    /// Authentication key was rejected
    #[error("Authentication failed: check the DeepL API key")]
    AuthenticationFailed,

    /// Translation quota for the account is exhausted
    #[error("Translation quota exceeded")]
    QuotaExceeded,

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

/// Translation service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeepLConfig {
    /// DeepL API base URL (default: <https://api-free.deepl.com/v2>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// DeepL API authentication key
    #[serde(default)]
    pub api_key: Option<String>,

    /// Connection timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api-free.deepl.com/v2".to_string()
}

const fn default_timeout() -> u64 {
    30
}

impl Default for DeepLConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout(),
        }
    }
}

impl DeepLConfig {
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }
}

/// Translation client trait
#[async_trait]
pub trait TranslationClient: Send + Sync {
    /// Translate `text` from `source` into `target`.
    async fn translate(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> Result<Translation, TranslationError>;

    /// Check if the translation service is healthy
    async fn is_healthy(&self) -> bool;
}

/// DeepL HTTP client implementation
#[derive(Debug)]
pub struct DeepLClient {
    client: Client,
    config: DeepLConfig,
}

impl DeepLClient {
    /// Create a new DeepL client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client
    /// cannot be initialized.
    pub fn new(config: DeepLConfig) -> Result<Self, TranslationError> {
        if config.api_key.as_deref().is_none_or(str::is_empty) {
            return Err(TranslationError::AuthenticationFailed);
        }

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TranslationError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn auth_header(&self) -> String {
        format!(
            "DeepL-Auth-Key {}",
            self.config.api_key.as_deref().unwrap_or_default()
        )
    }

    async fn map_error_response(response: reqwest::Response) -> TranslationError {
        let status = response.status();
        let message = response
            .text()
            .await
            .ok()
            .and_then(|body| serde_json::from_str::<ErrorResponse>(&body).ok())
            .map(|e| e.message);

        match status {
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                TranslationError::AuthenticationFailed
            }
            reqwest::StatusCode::TOO_MANY_REQUESTS => TranslationError::RateLimitExceeded,
            // 456 is DeepL's quota-exceeded status
            s if s.as_u16() == 456 => TranslationError::QuotaExceeded,
            s if s.is_server_error() => {
                TranslationError::ServiceUnavailable(message.unwrap_or_else(|| format!("HTTP {s}")))
            }
            s => TranslationError::RequestFailed(message.unwrap_or_else(|| format!("HTTP {s}"))),
        }
    }
}

#[async_trait]
impl TranslationClient for DeepLClient {
    #[instrument(skip(self, text), fields(source = %source, target = %target, chars = text.len()))]
    async fn translate(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> Result<Translation, TranslationError> {
        if text.trim().is_empty() {
            return Err(TranslationError::EmptyText);
        }

        let url = format!("{}/translate", self.config.base_url);
        let form = [
            ("text", text),
            ("source_lang", source.deepl_code()),
            ("target_lang", target.deepl_code()),
        ];

        debug!(url = %url, "Requesting translation");

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.auth_header())
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    TranslationError::ConnectionFailed(e.to_string())
                } else {
                    TranslationError::RequestFailed(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(Self::map_error_response(response).await);
        }

        let parsed: TranslateResponse = response
            .json()
            .await
            .map_err(|e| TranslationError::ParseError(e.to_string()))?;

        let item = parsed
            .translations
            .into_iter()
            .next()
            .ok_or_else(|| TranslationError::ParseError("No translations in response".to_string()))?;

        let mut translation = Translation::new(item.text);
        if let Some(detected) = item.detected_source_language {
            translation = translation.with_detected_source(detected);
        }
        Ok(translation)
    }

    async fn is_healthy(&self) -> bool {
        // Usage endpoint responds to any valid key without consuming quota
        let url = format!("{}/usage", self.config.base_url);
        match self
            .client
            .get(&url)
            .header("Authorization", self.auth_header())
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = DeepLConfig::default();
        assert_eq!(config.base_url, "https://api-free.deepl.com/v2");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_client_requires_api_key() {
        assert!(matches!(
            DeepLClient::new(DeepLConfig::default()),
            Err(TranslationError::AuthenticationFailed)
        ));
        assert!(matches!(
            DeepLClient::new(DeepLConfig::default().with_api_key("")),
            Err(TranslationError::AuthenticationFailed)
        ));
    }

    #[test]
    fn test_client_creation() {
        let client = DeepLClient::new(DeepLConfig::default().with_api_key("test-key:fx"));
        assert!(client.is_ok());
    }

    #[test]
    fn test_auth_header_format() {
        let client = DeepLClient::new(DeepLConfig::default().with_api_key("test-key:fx"))
            .expect("client creation should succeed");
        assert_eq!(client.auth_header(), "DeepL-Auth-Key test-key:fx");
    }

    #[test]
    fn test_error_display() {
        let err = TranslationError::QuotaExceeded;
        assert!(err.to_string().contains("quota"));

        let err = TranslationError::EmptyText;
        assert!(err.to_string().contains("empty"));
    }
}
