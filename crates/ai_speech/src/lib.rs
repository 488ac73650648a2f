//! Speech processing for Charla.
//!
//! Provides Speech-to-Text (transcription of recorded utterances) and
//! Text-to-Speech (spoken assistant replies) behind provider-agnostic
//! ports. The shipped providers talk to the OpenAI Whisper API and the
//! ElevenLabs synthesis API.

pub mod config;
pub mod error;
pub mod ports;
pub mod providers;
pub mod types;

pub use config::SpeechConfig;
pub use error::SpeechError;
pub use ports::{SpeechToText, TextToSpeech};
pub use providers::elevenlabs::ElevenLabsSpeech;
pub use providers::openai::WhisperSpeechToText;
pub use types::{AudioData, AudioFormat, Transcription};
