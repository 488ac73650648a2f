//! AI Core - Chat-completion client for tutoring explanations
//!
//! Provides the `InferenceEngine` port and an OpenAI chat-completions
//! implementation used to generate tutoring replies from a conversation
//! history.

pub mod config;
pub mod error;
pub mod openai;
pub mod ports;

pub use config::InferenceConfig;
pub use error::InferenceError;
pub use openai::OpenAiChatEngine;
pub use ports::{InferenceEngine, InferenceRequest, InferenceResponse, TokenUsage};
