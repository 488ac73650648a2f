//! Provider-agnostic speech ports.

use async_trait::async_trait;

use crate::error::SpeechError;
use crate::types::{AudioData, Transcription};

/// Transcribes recorded audio into text.
#[async_trait]
pub trait SpeechToText: Send + Sync {
    /// Transcribe an utterance. `language` is an ISO 639-1 hint
    /// (`"es"` for Charla sessions) or `None` for auto-detection.
    async fn transcribe(
        &self,
        audio: &AudioData,
        language: Option<&str>,
    ) -> Result<Transcription, SpeechError>;

    /// Quick reachability probe against the provider.
    async fn is_available(&self) -> bool;

    /// Model identifier used for transcription.
    fn model_name(&self) -> &str;
}

/// Renders text into spoken audio.
#[async_trait]
pub trait TextToSpeech: Send + Sync {
    /// Synthesize `text` into playable audio.
    async fn synthesize(&self, text: &str) -> Result<AudioData, SpeechError>;

    /// Quick reachability probe against the provider.
    async fn is_available(&self) -> bool;

    /// Model identifier used for synthesis.
    fn model_name(&self) -> &str;
}
