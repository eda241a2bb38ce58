//! The per-character conversation log.

use inquest_mystery::Message;
use serde::Serialize;

/// Append-only message history between the detective and one character.
///
/// The whole transcript is serialized and resent to the collaborator on
/// every turn; the collaborator itself is stateless, so this log is what
/// gives the illusion of memory.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    /// Creates an empty transcript.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True until first contact: no persona message has been synthesized yet.
    #[must_use]
    pub fn is_initial(&self) -> bool {
        self.messages.is_empty()
    }

    /// The messages in append order.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// True when no messages have been appended.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Appends a batch of messages, preserving order.
    pub fn extend(&mut self, messages: Vec<Message>) {
        self.messages.extend(messages);
    }
}
