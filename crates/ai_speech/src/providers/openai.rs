//! Whisper transcription via the OpenAI audio API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::config::SpeechConfig;
use crate::error::SpeechError;
use crate::ports::SpeechToText;
use crate::types::{AudioData, Transcription};

/// Speech-to-Text provider backed by the OpenAI `/audio/transcriptions`
/// endpoint.
pub struct WhisperSpeechToText {
    config: SpeechConfig,
    client: reqwest::Client,
}

impl std::fmt::Debug for WhisperSpeechToText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhisperSpeechToText")
            .field("base_url", &self.config.openai_base_url)
            .field("model", &self.config.stt_model)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    duration: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
    #[serde(default)]
    code: Option<String>,
}

impl WhisperSpeechToText {
    pub fn new(config: SpeechConfig) -> Result<Self, SpeechError> {
        config.validate().map_err(SpeechError::Configuration)?;
        if config.openai_api_key.is_none() {
            return Err(SpeechError::Configuration(
                "openai_api_key is required for transcription".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| SpeechError::Configuration(e.to_string()))?;

        Ok(Self { config, client })
    }

    fn api_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.openai_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn api_key(&self) -> &str {
        self.config.openai_api_key.as_deref().unwrap_or_default()
    }

    fn check_audio(&self, audio: &AudioData) -> Result<(), SpeechError> {
        if audio.is_empty() {
            return Err(SpeechError::InvalidAudio("empty recording".to_string()));
        }
        if let Some(duration) = audio.duration_ms()
            && duration > self.config.max_audio_duration_ms
        {
            return Err(SpeechError::InvalidAudio(format!(
                "recording of {duration}ms exceeds limit of {}ms",
                self.config.max_audio_duration_ms
            )));
        }
        Ok(())
    }

    fn map_api_error(status: reqwest::StatusCode, body: &str) -> SpeechError {
        if let Ok(parsed) = serde_json::from_str::<ApiErrorResponse>(body) {
            return match parsed.error.code.as_deref() {
                Some("rate_limit_exceeded") => SpeechError::RateLimited,
                Some("invalid_file_format" | "audio_too_short") => {
                    SpeechError::InvalidAudio(parsed.error.message)
                }
                _ if status.is_server_error() => SpeechError::ServerError(parsed.error.message),
                _ => SpeechError::RequestFailed(parsed.error.message),
            };
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return SpeechError::RateLimited;
        }
        if status.is_server_error() {
            return SpeechError::ServerError(format!("HTTP {status}"));
        }
        SpeechError::RequestFailed(format!("HTTP {status}: {body}"))
    }
}

#[async_trait]
impl SpeechToText for WhisperSpeechToText {
    #[instrument(skip(self, audio), fields(model = %self.config.stt_model, bytes = audio.len()))]
    async fn transcribe(
        &self,
        audio: &AudioData,
        language: Option<&str>,
    ) -> Result<Transcription, SpeechError> {
        self.check_audio(audio)?;

        let file = Part::bytes(audio.data().to_vec())
            .file_name(audio.filename())
            .mime_str(audio.format().mime_type())
            .map_err(|e| SpeechError::InvalidAudio(e.to_string()))?;

        let mut form = Form::new()
            .part("file", file)
            .text("model", self.config.stt_model.clone())
            .text("response_format", "verbose_json");
        if let Some(lang) = language {
            form = form.text("language", lang.to_string());
        }

        let response = self
            .client
            .post(self.api_url("audio/transcriptions"))
            .bearer_auth(self.api_key())
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SpeechError::Timeout(self.config.timeout_ms)
                } else {
                    SpeechError::from(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "transcription request rejected");
            return Err(Self::map_api_error(status, &body));
        }

        let parsed: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| SpeechError::InvalidResponse(e.to_string()))?;

        debug!(chars = parsed.text.len(), "transcription received");

        let mut transcription = Transcription::new(parsed.text);
        if let Some(language) = parsed.language {
            transcription = transcription.with_language(language);
        }
        if let Some(duration) = parsed.duration {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let duration_ms = (duration * 1000.0).round() as u64;
            transcription = transcription.with_duration(duration_ms);
        }
        Ok(transcription)
    }

    async fn is_available(&self) -> bool {
        let url = self.api_url("models");
        match self.client.get(url).bearer_auth(self.api_key()).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    fn model_name(&self) -> &str {
        &self.config.stt_model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AudioFormat;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(base_url: &str) -> WhisperSpeechToText {
        let config = SpeechConfig {
            openai_base_url: base_url.to_string(),
            ..SpeechConfig::test()
        };
        #[allow(clippy::unwrap_used)]
        WhisperSpeechToText::new(config).unwrap()
    }

    fn sample_audio() -> AudioData {
        AudioData::new(vec![0u8; 256], AudioFormat::Wav).with_duration(2000)
    }

    #[tokio::test]
    async fn transcribe_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/audio/transcriptions"))
            .and(header("authorization", "Bearer test-openai-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "text": "¿Dónde está la biblioteca?",
                "language": "spanish",
                "duration": 2.1
            })))
            .expect(1)
            .mount(&server)
            .await;

        let provider = provider(&server.uri());
        let result = provider
            .transcribe(&sample_audio(), Some("es"))
            .await
            .unwrap();

        assert_eq!(result.text, "¿Dónde está la biblioteca?");
        assert_eq!(result.language.as_deref(), Some("spanish"));
        assert_eq!(result.duration_ms, Some(2100));
    }

    #[tokio::test]
    async fn transcribe_rejects_empty_audio() {
        let provider = provider("http://localhost:1");
        let audio = AudioData::new(Vec::new(), AudioFormat::Wav);
        let err = provider.transcribe(&audio, None).await.unwrap_err();
        assert!(matches!(err, SpeechError::InvalidAudio(_)));
    }

    #[tokio::test]
    async fn transcribe_rejects_overlong_audio() {
        let provider = provider("http://localhost:1");
        let audio = AudioData::new(vec![0u8; 16], AudioFormat::Wav).with_duration(600_000);
        let err = provider.transcribe(&audio, None).await.unwrap_err();
        assert!(matches!(err, SpeechError::InvalidAudio(_)));
    }

    #[tokio::test]
    async fn transcribe_maps_rate_limit() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/audio/transcriptions"))
            .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
                "error": {
                    "message": "Rate limit reached",
                    "code": "rate_limit_exceeded"
                }
            })))
            .mount(&server)
            .await;

        let provider = provider(&server.uri());
        let err = provider
            .transcribe(&sample_audio(), Some("es"))
            .await
            .unwrap_err();
        assert!(matches!(err, SpeechError::RateLimited));
    }

    #[tokio::test]
    async fn transcribe_maps_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/audio/transcriptions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let provider = provider(&server.uri());
        let err = provider
            .transcribe(&sample_audio(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, SpeechError::ServerError(_)));
    }

    #[tokio::test]
    async fn availability_check() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/models"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": []
            })))
            .mount(&server)
            .await;

        let provider = provider(&server.uri());
        assert!(provider.is_available().await);
    }

    #[tokio::test]
    async fn requires_api_key() {
        let config = SpeechConfig::default();
        assert!(matches!(
            WhisperSpeechToText::new(config),
            Err(SpeechError::Configuration(_))
        ));
    }
}
