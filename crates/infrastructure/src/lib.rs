//! Infrastructure layer for Charla
//!
//! Wires the collaborator crates to the application ports, owns
//! microphone capture and playback, temp audio artifacts, and the
//! environment-driven configuration.

pub mod adapters;
pub mod audio;
pub mod config;

pub use adapters::{
    CpalAudioAdapter, DeepLTranslationAdapter, OpenAiInferenceAdapter, SpeechAdapter,
};
pub use audio::{
    AudioError, MicrophoneRecorder, RecordingConfig, TempAudioArtifact, sweep_leaked_artifacts,
};
pub use config::{AppConfig, ConfigError};
