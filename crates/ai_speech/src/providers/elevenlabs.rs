//! Text-to-Speech via the ElevenLabs synthesis API.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::config::SpeechConfig;
use crate::error::SpeechError;
use crate::ports::TextToSpeech;
use crate::types::{AudioData, AudioFormat};

const API_KEY_HEADER: &str = "xi-api-key";

/// Text-to-Speech provider backed by the ElevenLabs
/// `/text-to-speech/{voice_id}` endpoint.
pub struct ElevenLabsSpeech {
    config: SpeechConfig,
    client: reqwest::Client,
}

impl std::fmt::Debug for ElevenLabsSpeech {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElevenLabsSpeech")
            .field("base_url", &self.config.elevenlabs_base_url)
            .field("voice_id", &self.config.voice_id)
            .field("model", &self.config.tts_model_id)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Serialize)]
struct SynthesisRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: VoiceSettings,
}

#[derive(Debug, Serialize)]
struct VoiceSettings {
    stability: f32,
    similarity_boost: f32,
    style: f32,
    speed: f32,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    detail: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    status: Option<String>,
    message: String,
}

impl ElevenLabsSpeech {
    pub fn new(config: SpeechConfig) -> Result<Self, SpeechError> {
        config.validate().map_err(SpeechError::Configuration)?;
        if config.elevenlabs_api_key.is_none() {
            return Err(SpeechError::Configuration(
                "elevenlabs_api_key is required for synthesis".to_string(),
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
            self.config.elevenlabs_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn api_key(&self) -> &str {
        self.config
            .elevenlabs_api_key
            .as_deref()
            .unwrap_or_default()
    }

    fn voice_settings(&self) -> VoiceSettings {
        VoiceSettings {
            stability: self.config.stability,
            similarity_boost: self.config.similarity_boost,
            style: self.config.style,
            speed: self.config.speed,
        }
    }

    fn map_api_error(status: reqwest::StatusCode, body: &str) -> SpeechError {
        if let Ok(parsed) = serde_json::from_str::<ApiErrorResponse>(body) {
            return match parsed.detail.status.as_deref() {
                Some("too_many_concurrent_requests" | "system_busy") => SpeechError::RateLimited,
                _ if status.is_server_error() => SpeechError::ServerError(parsed.detail.message),
                _ => SpeechError::RequestFailed(parsed.detail.message),
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
impl TextToSpeech for ElevenLabsSpeech {
    #[instrument(skip(self, text), fields(voice = %self.config.voice_id, chars = text.len()))]
    async fn synthesize(&self, text: &str) -> Result<AudioData, SpeechError> {
        if text.trim().is_empty() {
            return Err(SpeechError::RequestFailed(
                "cannot synthesize empty text".to_string(),
            ));
        }

        let url = self.api_url(&format!("text-to-speech/{}", self.config.voice_id));
        let body = SynthesisRequest {
            text,
            model_id: &self.config.tts_model_id,
            voice_settings: self.voice_settings(),
        };

        let response = self
            .client
            .post(url)
            .query(&[("output_format", self.config.output_format.as_str())])
            .header(API_KEY_HEADER, self.api_key())
            .json(&body)
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
            warn!(%status, "synthesis request rejected");
            return Err(Self::map_api_error(status, &body));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SpeechError::InvalidResponse(e.to_string()))?;
        if bytes.is_empty() {
            return Err(SpeechError::InvalidResponse(
                "synthesis returned no audio".to_string(),
            ));
        }

        debug!(bytes = bytes.len(), "synthesis received");
        Ok(AudioData::new(bytes.to_vec(), AudioFormat::Mp3))
    }

    async fn is_available(&self) -> bool {
        let url = self.api_url("voices");
        match self
            .client
            .get(url)
            .header(API_KEY_HEADER, self.api_key())
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    fn model_name(&self) -> &str {
        &self.config.tts_model_id
    }
}
