//! Speech provider configuration.

use serde::{Deserialize, Serialize};

/// Configuration covering both the Whisper transcription client and
/// the ElevenLabs synthesis client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// OpenAI API key used for Whisper transcription.
    #[serde(default)]
    pub openai_api_key: Option<String>,

    /// Base URL of the OpenAI-compatible API.
    #[serde(default = "default_openai_base_url")]
    pub openai_base_url: String,

    /// Transcription model identifier.
    #[serde(default = "default_stt_model")]
    pub stt_model: String,

    /// ElevenLabs API key used for synthesis.
    #[serde(default)]
    pub elevenlabs_api_key: Option<String>,

    /// Base URL of the ElevenLabs API.
    #[serde(default = "default_elevenlabs_base_url")]
    pub elevenlabs_base_url: String,

    /// ElevenLabs voice identifier.
    #[serde(default = "default_voice_id")]
    pub voice_id: String,

    /// ElevenLabs synthesis model.
    #[serde(default = "default_tts_model_id")]
    pub tts_model_id: String,

    /// Encoded output format requested from ElevenLabs.
    #[serde(default = "default_output_format")]
    pub output_format: String,

    /// Voice stability, 0.0..=1.0.
    #[serde(default = "default_stability")]
    pub stability: f32,

    /// Voice similarity boost, 0.0..=1.0.
    #[serde(default = "default_similarity_boost")]
    pub similarity_boost: f32,

    /// Style exaggeration, 0.0..=1.0.
    #[serde(default = "default_style")]
    pub style: f32,

    /// Playback speed multiplier. Slowed below 1.0 for learners.
    #[serde(default = "default_speed")]
    pub speed: f32,

    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Longest recording accepted for transcription, in milliseconds.
    #[serde(default = "default_max_audio_duration_ms")]
    pub max_audio_duration_ms: u64,
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_stt_model() -> String {
    "whisper-1".to_string()
}

fn default_elevenlabs_base_url() -> String {
    "https://api.elevenlabs.io/v1".to_string()
}

fn default_voice_id() -> String {
    "21m00Tcm4TlvDq8ikWAM".to_string()
}

fn default_tts_model_id() -> String {
    "eleven_multilingual_v2".to_string()
}

fn default_output_format() -> String {
    "mp3_22050_32".to_string()
}

const fn default_stability() -> f32 {
    0.5
}

const fn default_similarity_boost() -> f32 {
    0.75
}

const fn default_style() -> f32 {
    0.15
}

const fn default_speed() -> f32 {
    0.75
}

const fn default_timeout_ms() -> u64 {
    30_000
}

const fn default_max_audio_duration_ms() -> u64 {
    120_000
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_base_url: default_openai_base_url(),
            stt_model: default_stt_model(),
            elevenlabs_api_key: None,
            elevenlabs_base_url: default_elevenlabs_base_url(),
            voice_id: default_voice_id(),
            tts_model_id: default_tts_model_id(),
            output_format: default_output_format(),
            stability: default_stability(),
            similarity_boost: default_similarity_boost(),
            style: default_style(),
            speed: default_speed(),
            timeout_ms: default_timeout_ms(),
            max_audio_duration_ms: default_max_audio_duration_ms(),
        }
    }
}

impl SpeechConfig {
    #[must_use]
    pub fn with_openai_api_key(mut self, key: impl Into<String>) -> Self {
        self.openai_api_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn with_elevenlabs_api_key(mut self, key: impl Into<String>) -> Self {
        self.elevenlabs_api_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn with_voice_id(mut self, voice_id: impl Into<String>) -> Self {
        self.voice_id = voice_id.into();
        self
    }

    /// Validate field ranges and required URLs.
    pub fn validate(&self) -> Result<(), String> {
        if self.openai_base_url.is_empty() {
            return Err("openai_base_url cannot be empty".to_string());
        }
        if self.elevenlabs_base_url.is_empty() {
            return Err("elevenlabs_base_url cannot be empty".to_string());
        }
        if self.voice_id.is_empty() {
            return Err("voice_id cannot be empty".to_string());
        }
        if !(0.0..=1.0).contains(&self.stability) {
            return Err(format!("stability must be in 0.0..=1.0, got {}", self.stability));
        }
        if !(0.0..=1.0).contains(&self.similarity_boost) {
            return Err(format!(
                "similarity_boost must be in 0.0..=1.0, got {}",
                self.similarity_boost
            ));
        }
        if !(0.0..=1.0).contains(&self.style) {
            return Err(format!("style must be in 0.0..=1.0, got {}", self.style));
        }
        if !(0.25..=4.0).contains(&self.speed) {
            return Err(format!("speed must be in 0.25..=4.0, got {}", self.speed));
        }
        if self.timeout_ms == 0 {
            return Err("timeout_ms must be greater than 0".to_string());
        }
        Ok(())
    }

    #[cfg(test)]
    #[must_use]
    pub fn test() -> Self {
        Self {
            openai_api_key: Some("test-openai-key".to_string()),
            elevenlabs_api_key: Some("test-eleven-key".to_string()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(SpeechConfig::default().validate().is_ok());
    }

    #[test]
    fn defaults_match_expected_models() {
        let config = SpeechConfig::default();
        assert_eq!(config.stt_model, "whisper-1");
        assert_eq!(config.tts_model_id, "eleven_multilingual_v2");
        assert_eq!(config.voice_id, "21m00Tcm4TlvDq8ikWAM");
        assert_eq!(config.output_format, "mp3_22050_32");
    }

    #[test]
    fn rejects_out_of_range_voice_settings() {
        let config = SpeechConfig {
            stability: 1.5,
            ..SpeechConfig::default()
        };
        assert!(config.validate().is_err());

        let config = SpeechConfig {
            speed: 0.1,
            ..SpeechConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_empty_voice_id() {
        let config = SpeechConfig {
            voice_id: String::new(),
            ..SpeechConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
