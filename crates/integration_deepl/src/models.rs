//! DeepL API data models.

use serde::{Deserialize, Serialize};

/// A completed translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    /// Translated text in the target language.
    pub text: String,
    /// Source language DeepL detected, e.g. `"ES"`.
    pub detected_source_language: Option<String>,
}

impl Translation {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            detected_source_language: None,
        }
    }

    #[must_use]
    pub fn with_detected_source(mut self, language: impl Into<String>) -> Self {
        self.detected_source_language = Some(language.into());
        self
    }
}

/// Wire response from `POST /v2/translate`.
#[derive(Debug, Deserialize)]
pub(crate) struct TranslateResponse {
    pub translations: Vec<TranslationItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TranslationItem {
    pub text: String,
    #[serde(default)]
    pub detected_source_language: Option<String>,
}

/// Wire error payload, e.g. `{"message": "Wrong endpoint."}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    pub message: String,
}
