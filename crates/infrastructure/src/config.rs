//! Application configuration assembled from the environment
//!
//! Credentials are read once at startup and passed by reference into
//! the adapters. A missing credential is fatal; nothing in the session
//! loop reads the environment.

use ai_core::InferenceConfig;
use ai_speech::SpeechConfig;
use integration_deepl::DeepLConfig;
use thiserror::Error;

use crate::audio::RecordingConfig;

/// Environment variable holding the OpenAI API key (chat + Whisper).
pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
/// Environment variable holding the DeepL API key.
pub const DEEPL_ACCESS_KEY: &str = "DEEPL_ACCESS_KEY";
/// Environment variable holding the ElevenLabs API key.
pub const ELEVEN_LABS_API_KEY: &str = "ELEVEN_LABS_API_KEY";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required credential is not set in the environment
    #[error("Missing required environment variable: {0}")]
    MissingCredential(&'static str),

    /// A config section failed validation
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Chat-completion client configuration
    pub inference: InferenceConfig,
    /// Transcription and synthesis configuration
    pub speech: SpeechConfig,
    /// Translation client configuration
    pub translation: DeepLConfig,
    /// Microphone capture configuration
    pub recording: RecordingConfig,
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error when a required credential is missing or a
    /// section fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let openai_key = require(&lookup, OPENAI_API_KEY)?;
        let deepl_key = require(&lookup, DEEPL_ACCESS_KEY)?;
        let eleven_key = require(&lookup, ELEVEN_LABS_API_KEY)?;

        let inference = InferenceConfig::default().with_api_key(openai_key.clone());
        inference.validate().map_err(ConfigError::Invalid)?;

        let speech = SpeechConfig::default()
            .with_openai_api_key(openai_key)
            .with_elevenlabs_api_key(eleven_key);
        speech.validate().map_err(ConfigError::Invalid)?;

        let translation = DeepLConfig::default().with_api_key(deepl_key);

        let recording = RecordingConfig::default();
        recording.validate().map_err(ConfigError::Invalid)?;

        Ok(Self {
            inference,
            speech,
            translation,
            recording,
        })
    }
}

fn require(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<String, ConfigError> {
    lookup(name)
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::MissingCredential(name))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn full_env() -> HashMap<String, String> {
        env(&[
            (OPENAI_API_KEY, "sk-test"),
            (DEEPL_ACCESS_KEY, "deepl-test:fx"),
            (ELEVEN_LABS_API_KEY, "eleven-test"),
        ])
    }

    #[test]
    fn loads_with_all_credentials() {
        let vars = full_env();
        let config = AppConfig::from_lookup(|name| vars.get(name).cloned())
            .expect("config should load");

        assert_eq!(config.inference.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.speech.openai_api_key.as_deref(), Some("sk-test"));
        assert_eq!(
            config.speech.elevenlabs_api_key.as_deref(),
            Some("eleven-test")
        );
        assert_eq!(config.translation.api_key.as_deref(), Some("deepl-test:fx"));
    }

    #[test]
    fn missing_credential_is_fatal() {
        for missing in [OPENAI_API_KEY, DEEPL_ACCESS_KEY, ELEVEN_LABS_API_KEY] {
            let mut vars = full_env();
            vars.remove(missing);
            let result = AppConfig::from_lookup(|name| vars.get(name).cloned());
            assert!(
                matches!(result, Err(ConfigError::MissingCredential(name)) if name == missing),
                "expected missing {missing}"
            );
        }
    }

    #[test]
    fn blank_credential_counts_as_missing() {
        let mut vars = full_env();
        vars.insert(OPENAI_API_KEY.to_string(), "   ".to_string());
        let result = AppConfig::from_lookup(|name| vars.get(name).cloned());
        assert!(matches!(
            result,
            Err(ConfigError::MissingCredential(OPENAI_API_KEY))
        ));
    }
}
