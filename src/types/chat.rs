use serde::{Deserialize, Serialize};

use crate::types::Message;
use crate::utils::time::{next_id_millis, now_millis};

/// Title given to a chat before the user renames it.
pub const DEFAULT_TITLE: &str = "New Chat";

/// A conversation thread: an ordered, append-only sequence of messages.
///
/// Message order is append order; individual messages are never reordered or
/// deleted. A chat is created empty, grows by one user message followed
/// (asynchronously) by one assistant message per send, and is destroyed only
/// by explicit deletion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chat {
    /// Opaque identifier.
    pub id: String,

    /// Display title; defaults to [`DEFAULT_TITLE`].
    pub title: String,

    /// The messages of the conversation, in append order.
    pub messages: Vec<Message>,

    /// Creation time in epoch milliseconds.
    pub created_at: i64,

    /// Last-updated time in epoch milliseconds.
    pub updated_at: i64,
}

impl Chat {
    /// Create a new, empty chat with a placeholder title.
    pub fn new() -> Self {
        let now = now_millis();
        Self {
            id: next_id_millis().to_string(),
            title: DEFAULT_TITLE.to_string(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Append a message and bump the last-updated timestamp.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
        self.updated_at = now_millis();
    }

    /// Set the display title and bump the last-updated timestamp.
    pub fn rename(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.updated_at = now_millis();
    }

    /// Returns the number of messages in the chat.
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }
}

impl Default for Chat {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_chat_is_empty_with_placeholder_title() {
        let chat = Chat::new();
        assert_eq!(chat.title, DEFAULT_TITLE);
        assert!(chat.messages.is_empty());
        assert_eq!(chat.created_at, chat.updated_at);
    }

    #[test]
    fn push_preserves_append_order() {
        let mut chat = Chat::new();
        chat.push(Message::user("first"));
        chat.push(Message::assistant("second"));
        chat.push(Message::user("third"));

        let contents: Vec<&str> = chat.messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second", "third"]);
    }

    #[test]
    fn rename_updates_title() {
        let mut chat = Chat::new();
        chat.rename("Rust questions");
        assert_eq!(chat.title, "Rust questions");
    }

    #[test]
    fn chat_round_trips_through_json() {
        let mut chat = Chat::new();
        chat.push(Message::user("hello"));
        let json = serde_json::to_string(&chat).unwrap();
        let back: Chat = serde_json::from_str(&json).unwrap();
        assert_eq!(chat, back);
    }
}
