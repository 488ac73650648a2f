//! Local audio: microphone capture, playback, and temp artifacts

pub mod artifacts;
pub mod playback;
pub mod recorder;

use thiserror::Error;

pub use artifacts::{TempAudioArtifact, sweep_leaked_artifacts};
pub use playback::play_encoded;
pub use recorder::{MicrophoneRecorder, RecordingConfig};

/// Errors from local audio capture or playback
#[derive(Debug, Error)]
pub enum AudioError {
    /// No input device is available on this machine
    #[error("No microphone available")]
    NoInputDevice,

    /// The audio device rejected the requested configuration
    #[error("Audio device error: {0}")]
    Device(String),

    /// The capture stream failed
    #[error("Capture stream error: {0}")]
    Stream(String),

    /// WAV encoding failed
    #[error("Audio encoding error: {0}")]
    Encode(String),

    /// Audio playback failed
    #[error("Playback error: {0}")]
    Playback(String),

    /// Filesystem error around an audio artifact
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
