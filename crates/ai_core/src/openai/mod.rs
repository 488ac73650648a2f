//! OpenAI chat-completions engine implementation
//!
//! Connects to the OpenAI API (or any server exposing the same
//! `/chat/completions` contract).

mod client;

pub use client::OpenAiChatEngine;
