use serde::{Deserialize, Serialize};

use crate::utils::time::{next_id_millis, now_millis};

/// A single message within a chat.
///
/// The content is stored exactly as produced: an assistant message may embed a
/// reasoning segment wrapped in `<think>...</think>` tags, which is split out
/// at render time (see [`crate::reasoning::split_reasoning`]).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    /// Opaque caller-generated identifier, monotonic enough for ordering.
    pub id: String,

    /// The role of the message author.
    pub role: MessageRole,

    /// The textual content of the message.
    pub content: String,

    /// Creation time in epoch milliseconds.
    pub timestamp: i64,
}

/// Role type for a message.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// User role.
    User,

    /// Assistant role.
    Assistant,
}

impl Message {
    /// Create a new `Message` with the given role and content.
    ///
    /// The identifier and timestamp are minted from the current epoch-ms
    /// clock.
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        let timestamp = now_millis();
        Self {
            id: next_id_millis().to_string(),
            role,
            content: content.into(),
            timestamp,
        }
    }

    /// Create a new user `Message`.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    /// Create a new assistant `Message`.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, to_value};

    #[test]
    fn user_message_serializes_with_lowercase_role() {
        let mut message = Message::user("Hello!");
        message.id = "1700000000000".to_string();
        message.timestamp = 1_700_000_000_000;
        let json = to_value(&message).unwrap();

        assert_eq!(
            json,
            json!({
                "id": "1700000000000",
                "role": "user",
                "content": "Hello!",
                "timestamp": 1_700_000_000_000i64
            })
        );
    }

    #[test]
    fn roles_round_trip() {
        for role in [MessageRole::User, MessageRole::Assistant] {
            let json = to_value(role).unwrap();
            let back: MessageRole = serde_json::from_value(json).unwrap();
            assert_eq!(role, back);
        }
    }

    #[test]
    fn constructors_set_role() {
        assert_eq!(Message::user("hi").role, MessageRole::User);
        assert_eq!(Message::assistant("hi").role, MessageRole::Assistant);
    }
}
