//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Utterance was empty or whitespace-only
    #[error("Empty utterance")]
    EmptyUtterance,

    /// Unknown language code
    #[error("Unknown language: {0}")]
    UnknownLanguage(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_utterance_error_message() {
        let err = DomainError::EmptyUtterance;
        assert_eq!(err.to_string(), "Empty utterance");
    }

    #[test]
    fn unknown_language_error_message() {
        let err = DomainError::UnknownLanguage("xx".to_string());
        assert_eq!(err.to_string(), "Unknown language: xx");
    }

    #[test]
    fn validation_error_message() {
        let err = DomainError::ValidationError("content is required".to_string());
        assert_eq!(err.to_string(), "Validation failed: content is required");
    }
}
