//! Speech adapter - Implements SpeechPort using ai_speech

use ai_speech::{
    AudioData, AudioFormat, ElevenLabsSpeech, SpeechConfig, SpeechError, SpeechToText,
    TextToSpeech, WhisperSpeechToText,
};
use application::{
    error::ApplicationError,
    ports::{AudioEncoding, SpeechPort, SynthesisResult, TranscriptionResult},
};
use async_trait::async_trait;
use tracing::instrument;

/// Adapter combining Whisper transcription and ElevenLabs synthesis
pub struct SpeechAdapter {
    stt: WhisperSpeechToText,
    tts: ElevenLabsSpeech,
}

impl std::fmt::Debug for SpeechAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechAdapter")
            .field("stt", &self.stt)
            .field("tts", &self.tts)
            .finish()
    }
}

impl SpeechAdapter {
    /// Create a new adapter with the given configuration
    pub fn new(config: SpeechConfig) -> Result<Self, ApplicationError> {
        let stt = WhisperSpeechToText::new(config.clone())
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        let tts = ElevenLabsSpeech::new(config)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self { stt, tts })
    }

    const fn to_ai_format(encoding: AudioEncoding) -> AudioFormat {
        match encoding {
            AudioEncoding::Wav => AudioFormat::Wav,
            AudioEncoding::Mp3 => AudioFormat::Mp3,
        }
    }

    const fn to_encoding(format: AudioFormat) -> AudioEncoding {
        match format {
            AudioFormat::Wav => AudioEncoding::Wav,
            AudioFormat::Mp3 => AudioEncoding::Mp3,
        }
    }

    /// Convert speech error to application error
    fn map_error(e: SpeechError) -> ApplicationError {
        match e {
            SpeechError::RateLimited => ApplicationError::RateLimited,
            SpeechError::Configuration(msg) => ApplicationError::Configuration(msg),
            other => ApplicationError::Speech(other.to_string()),
        }
    }
}

#[async_trait]
impl SpeechPort for SpeechAdapter {
    #[instrument(skip(self, audio_data), fields(bytes = audio_data.len()))]
    async fn transcribe(
        &self,
        audio_data: Vec<u8>,
        encoding: AudioEncoding,
        language_hint: Option<String>,
    ) -> Result<TranscriptionResult, ApplicationError> {
        let audio = AudioData::new(audio_data, Self::to_ai_format(encoding));

        let transcription = self
            .stt
            .transcribe(&audio, language_hint.as_deref())
            .await
            .map_err(Self::map_error)?;

        Ok(TranscriptionResult {
            text: transcription.text,
            detected_language: transcription.language,
            duration_ms: transcription.duration_ms,
        })
    }

    #[instrument(skip(self, text), fields(chars = text.len()))]
    async fn synthesize(&self, text: &str) -> Result<SynthesisResult, ApplicationError> {
        let audio = self.tts.synthesize(text).await.map_err(Self::map_error)?;

        let encoding = Self::to_encoding(audio.format());
        Ok(SynthesisResult {
            audio_data: audio.into_data(),
            encoding,
        })
    }

    async fn is_available(&self) -> bool {
        self.stt.is_available().await && self.tts.is_available().await
    }
}
