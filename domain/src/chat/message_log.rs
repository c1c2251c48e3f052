//! Append-only log of completed replies.

use super::session::CompletedMessage;
use serde::Serialize;

/// Ordered record of finalized messages (insertion order = completion order).
///
/// There is no way to edit or remove an entry once committed.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct MessageLog {
    entries: Vec<String>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a completed message and return its index.
    pub fn commit(&mut self, message: CompletedMessage) -> usize {
        self.entries.push(message.into_string());
        self.entries.len() - 1
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
