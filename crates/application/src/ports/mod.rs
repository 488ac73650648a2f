//! Port definitions - Interfaces implemented by infrastructure adapters

pub mod audio_port;
pub mod inference_port;
pub mod speech_port;
pub mod translation_port;

pub use audio_port::{AudioEncoding, AudioPort, RecordedAudio};
pub use inference_port::{InferencePort, InferenceResult};
pub use speech_port::{SpeechPort, SynthesisResult, TranscriptionResult};
pub use translation_port::{TranslationPort, TranslationResult};

#[cfg(test)]
pub use audio_port::MockAudioPort;
#[cfg(test)]
pub use inference_port::MockInferencePort;
#[cfg(test)]
pub use speech_port::MockSpeechPort;
#[cfg(test)]
pub use translation_port::MockTranslationPort;
