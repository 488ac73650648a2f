//! DeepL translation integration
//!
//! Client for the DeepL translation API (<https://www.deepl.com/pro-api>).
//! Translates learner utterances from Spanish to English so sessions can
//! show an advisory gloss alongside the conversation.

pub mod client;
mod models;

pub use client::{DeepLClient, DeepLConfig, TranslationClient, TranslationError};
pub use models::Translation;
