//! Shipped speech providers.

pub mod elevenlabs;
pub mod openai;
