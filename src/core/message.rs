//! # Messages
//!
//! Transient notifications queued by screens and the engine. The next render
//! flushes the whole queue, newest first, and leaves it empty.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Debug,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub severity: Severity,
}

#[derive(Debug, Default)]
pub struct MessageQueue {
    items: Vec<Message>,
}

impl MessageQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, text: impl Into<String>, severity: Severity) {
        self.items.push(Message {
            text: text.into(),
            severity,
        });
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push(text, Severity::Error);
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.push(text, Severity::Success);
    }

    pub fn debug(&mut self, text: impl Into<String>) {
        self.push(text, Severity::Debug);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Queued messages, oldest first, without consuming them.
    pub fn pending(&self) -> &[Message] {
        &self.items
    }

    /// Removes every queued message, most recent first.
    pub fn drain_newest_first(&mut self) -> Vec<Message> {
        let mut drained = std::mem::take(&mut self.items);
        drained.reverse();
        drained
    }
}
