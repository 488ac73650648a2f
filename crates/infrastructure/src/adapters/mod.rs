//! Port adapters - Implement application ports with the collaborator crates

pub mod audio_adapter;
pub mod inference_adapter;
pub mod speech_adapter;
pub mod translation_adapter;

pub use audio_adapter::CpalAudioAdapter;
pub use inference_adapter::OpenAiInferenceAdapter;
pub use speech_adapter::SpeechAdapter;
pub use translation_adapter::DeepLTranslationAdapter;
