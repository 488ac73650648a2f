//! Language value object
//!
//! The collaborators disagree on language codes: DeepL wants upper-case
//! (`ES`), Whisper wants ISO 639-1 lower-case (`es`). This type owns the
//! mapping so the codes never drift apart at call sites.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// A language the assistant can work with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Spanish (the language being learned)
    Spanish,
    /// English (the learner's language)
    English,
}

impl Language {
    /// ISO 639-1 code, as used by Whisper transcription
    #[must_use]
    pub const fn iso639(&self) -> &'static str {
        match self {
            Self::Spanish => "es",
            Self::English => "en",
        }
    }

    /// DeepL language code
    #[must_use]
    pub const fn deepl_code(&self) -> &'static str {
        match self {
            Self::Spanish => "ES",
            Self::English => "EN",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.iso639())
    }
}

impl FromStr for Language {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "es" | "spanish" => Ok(Self::Spanish),
            "en" | "english" => Ok(Self::English),
            other => Err(DomainError::UnknownLanguage(other.to_string())),
        }
    }
}
