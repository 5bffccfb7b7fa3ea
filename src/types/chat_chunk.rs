use serde::{Deserialize, Serialize};

/// One decoded line of a streaming chat response.
///
/// The server delivers the response as newline-delimited JSON objects shaped
/// `{"message": {"content": ...}, "done": ...}`; both fields may be absent on
/// any given line.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatChunk {
    /// The partial message carried by this line, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<ChunkMessage>,

    /// True on the final line of the response.
    #[serde(default)]
    pub done: bool,
}

/// The message fragment within a [`ChatChunk`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChunkMessage {
    /// The content fragment to append to the accumulated response.
    #[serde(default)]
    pub content: String,
}

impl ChatChunk {
    /// Returns the content fragment carried by this chunk, if any.
    pub fn content(&self) -> Option<&str> {
        self.message.as_ref().map(|m| m.content.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_line_parses() {
        let chunk: ChatChunk =
            serde_json::from_str(r#"{"message":{"content":"Hel"},"done":false}"#).unwrap();
        assert_eq!(chunk.content(), Some("Hel"));
        assert!(!chunk.done);
    }

    #[test]
    fn done_line_parses_without_message() {
        let chunk: ChatChunk = serde_json::from_str(r#"{"done":true}"#).unwrap();
        assert_eq!(chunk.content(), None);
        assert!(chunk.done);
    }

    #[test]
    fn missing_fields_default() {
        let chunk: ChatChunk = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(chunk.content(), None);
        assert!(!chunk.done);
    }

    #[test]
    fn extra_fields_are_ignored() {
        let chunk: ChatChunk = serde_json::from_str(
            r#"{"model":"deepseek-r1:1.5b","created_at":"2024-01-01T00:00:00Z","message":{"role":"assistant","content":"lo"},"done":false}"#,
        )
        .unwrap();
        assert_eq!(chunk.content(), Some("lo"));
    }
}
