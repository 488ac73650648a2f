//! Conversation entity - an append-only sequence of chat messages
//!
//! Invariants: if a system prompt is supplied it is the first message and is
//! set exactly once at construction; messages are only ever appended, never
//! mutated, removed, or reordered. The only mutation surface is the `add_*`
//! family; collaborator calls read a snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ChatMessage, MessageRole};
use crate::value_objects::SessionId;

/// A conversation containing a sequence of messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    /// Unique session identifier
    pub id: SessionId,
    /// Messages in the conversation (oldest first)
    messages: Vec<ChatMessage>,
    /// When the conversation started
    pub created_at: DateTime<Utc>,
    /// When the conversation was last updated
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    /// Create a new empty conversation
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: SessionId::new(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a new conversation whose first message is a system prompt
    pub fn with_system_prompt(system_prompt: impl Into<String>) -> Self {
        let mut conv = Self::new();
        conv.messages.push(ChatMessage::system(system_prompt));
        conv
    }

    /// Append a message to the conversation
    ///
    /// `System` messages are rejected after construction so the
    /// system-prompt-first invariant cannot be broken by callers.
    pub fn add_message(&mut self, message: ChatMessage) {
        debug_assert!(message.role != MessageRole::System);
        self.messages.push(message);
        self.updated_at = Utc::now();
    }

    /// Append a user message
    pub fn add_user_message(&mut self, content: impl Into<String>) {
        self.add_message(ChatMessage::user(content));
    }

    /// Append an assistant message
    pub fn add_assistant_message(&mut self, content: impl Into<String>) {
        self.add_message(ChatMessage::assistant(content));
    }

    /// Read-only snapshot of the history, for collaborator calls
    pub fn snapshot(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Get the last message in the conversation
    pub fn last_message(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// Get the system prompt, if one was set at construction
    pub fn system_prompt(&self) -> Option<&str> {
        self.messages
            .first()
            .filter(|m| m.role == MessageRole::System)
            .map(|m| m.content.as_str())
    }

    /// Get the number of messages
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Check if the conversation is empty
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}
