//! Speech subsystem errors.

use thiserror::Error;

/// Errors surfaced by transcription or synthesis providers.
#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("failed to connect to speech service: {0}")]
    ConnectionFailed(String),

    #[error("speech request failed: {0}")]
    RequestFailed(String),

    #[error("invalid response from speech service: {0}")]
    InvalidResponse(String),

    #[error("speech request timed out after {0}ms")]
    Timeout(u64),

    #[error("rate limited by speech service")]
    RateLimited,

    #[error("audio rejected: {0}")]
    InvalidAudio(String),

    #[error("speech service error: {0}")]
    ServerError(String),

    #[error("speech configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for SpeechError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(0)
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else if err.is_decode() {
            Self::InvalidResponse(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = SpeechError::Timeout(30_000);
        assert_eq!(err.to_string(), "speech request timed out after 30000ms");

        let err = SpeechError::InvalidAudio("empty recording".to_string());
        assert_eq!(err.to_string(), "audio rejected: empty recording");
    }
}
