//! Speech port - Interface for speech-to-text and text-to-speech operations

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;
use crate::ports::audio_port::AudioEncoding;

/// Result of a transcription operation
#[derive(Debug, Clone)]
pub struct TranscriptionResult {
    /// Transcribed text
    pub text: String,
    /// Detected language, if reported by the service
    pub detected_language: Option<String>,
    /// Duration of the audio in milliseconds
    pub duration_ms: Option<u64>,
}

/// Result of a speech synthesis operation
#[derive(Debug, Clone)]
pub struct SynthesisResult {
    /// Generated audio bytes
    pub audio_data: Vec<u8>,
    /// Encoding of the audio
    pub encoding: AudioEncoding,
}

/// Port for speech processing operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SpeechPort: Send + Sync {
    /// Transcribe recorded audio to text.
    ///
    /// `language_hint` is an ISO 639-1 code; Charla sessions pass "es".
    async fn transcribe(
        &self,
        audio_data: Vec<u8>,
        encoding: AudioEncoding,
        language_hint: Option<String>,
    ) -> Result<TranscriptionResult, ApplicationError>;

    /// Synthesize speech from text
    async fn synthesize(&self, text: &str) -> Result<SynthesisResult, ApplicationError>;

    /// Check if the speech services are reachable
    async fn is_available(&self) -> bool;
}
