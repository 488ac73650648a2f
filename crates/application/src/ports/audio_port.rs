//! Audio port - Interface for local microphone capture and playback

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Encoding of audio bytes crossing the port boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioEncoding {
    /// WAV container (PCM), produced by the recorder
    Wav,
    /// MP3, produced by speech synthesis
    Mp3,
}

/// A completed microphone recording
#[derive(Debug, Clone)]
pub struct RecordedAudio {
    /// Encoded audio bytes (WAV)
    pub data: Vec<u8>,
    /// Capture sample rate in Hz
    pub sample_rate: u32,
    /// Recorded duration in milliseconds
    pub duration_ms: u64,
}

/// Port for local audio capture and playback
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AudioPort: Send + Sync {
    /// Record from the microphone until the user stops or the maximum
    /// duration elapses. Blocks the turn; runs capture off the async
    /// runtime internally.
    async fn record(&self) -> Result<RecordedAudio, ApplicationError>;

    /// Play encoded audio to completion
    async fn play(&self, data: Vec<u8>, encoding: AudioEncoding)
    -> Result<(), ApplicationError>;
}
