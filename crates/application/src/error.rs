//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Inference/AI error
    #[error("Inference error: {0}")]
    Inference(String),

    /// Translation service error
    #[error("Translation error: {0}")]
    Translation(String),

    /// Speech service error (transcription or synthesis)
    #[error("Speech error: {0}")]
    Speech(String),

    /// Local audio capture or playback error
    #[error("Audio error: {0}")]
    Audio(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Whether a session can continue after this error.
    ///
    /// Collaborator failures degrade a single turn; configuration and
    /// internal errors end the session.
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Configuration(_) | Self::Internal(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collaborator_failures_are_recoverable() {
        assert!(ApplicationError::Inference("down".to_string()).is_recoverable());
        assert!(ApplicationError::Translation("down".to_string()).is_recoverable());
        assert!(ApplicationError::Speech("down".to_string()).is_recoverable());
        assert!(ApplicationError::RateLimited.is_recoverable());
    }

    #[test]
    fn configuration_errors_are_fatal() {
        assert!(!ApplicationError::Configuration("missing key".to_string()).is_recoverable());
        assert!(!ApplicationError::Internal("bug".to_string()).is_recoverable());
    }
}
