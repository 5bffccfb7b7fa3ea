//! Core chat session management.
//!
//! This module provides the `ChatSession` struct which manages the current
//! chat, talks to the model server, and persists every turn to the store.

use crate::chat::config::ChatConfig;
use crate::error::Result;
use crate::reasoning::split_reasoning;
use crate::store::ChatStore;
use crate::types::{Chat, ChatMessage, ChatParams, Message, Model};
use crate::{Error, Ollama, Renderer};

/// Error message shown to the user when the model server cannot be reached.
pub const CONNECTION_HELP: &str =
    "Failed to connect to the model server. Make sure it is running locally.";

/// A one-line summary of a stored chat, for listings.
#[derive(Debug, Clone)]
pub struct ChatSummary {
    /// The chat's unique id.
    pub id: String,
    /// The chat's title.
    pub title: String,
    /// The number of messages in the chat.
    pub message_count: usize,
    /// When the chat was last updated, in milliseconds since the epoch.
    pub updated_at: i64,
}

/// Aggregated stats for a chat session.
#[derive(Debug, Clone)]
pub struct SessionStats {
    /// The model used for the session.
    pub model: Model,
    /// The id of the open chat, if any.
    pub current_chat: Option<String>,
    /// The number of messages in the open chat.
    pub message_count: usize,
    /// The number of chats in the store.
    pub chat_count: usize,
    /// Total number of requests sent to the server.
    pub total_requests: u64,
}

/// A chat session that manages conversation state and server interactions.
///
/// The session keeps at most one chat open at a time. Every mutation of the
/// open chat is written through to the store immediately, so a crash between
/// turns loses nothing.
pub struct ChatSession {
    client: Ollama,
    store: ChatStore,
    config: ChatConfig,
    current: Option<Chat>,
    request_count: u64,
}

impl ChatSession {
    /// Creates a new chat session with the given client, store, and
    /// configuration. No chat is open until `new_chat` or `open` is called.
    pub fn new(client: Ollama, store: ChatStore, config: ChatConfig) -> Self {
        Self {
            client,
            store,
            config,
            current: None,
            request_count: 0,
        }
    }

    /// Returns the currently open chat, if any.
    pub fn current(&self) -> Option<&Chat> {
        self.current.as_ref()
    }

    /// Returns the session configuration.
    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// Changes the model used for subsequent requests.
    pub fn set_model(&mut self, model: Model) {
        self.config.model = model;
    }

    /// Starts a new chat and makes it current.
    ///
    /// The empty chat is persisted immediately so it shows up in listings
    /// even before the first message is sent.
    pub fn new_chat(&mut self) -> Result<&Chat> {
        let chat = Chat::new();
        self.store.save(&chat)?;
        Ok(self.current.insert(chat))
    }

    /// Opens a stored chat by id and makes it current.
    ///
    /// # Errors
    ///
    /// Returns a validation error if no chat with the given id exists.
    pub fn open(&mut self, id: &str) -> Result<&Chat> {
        let chat = self
            .store
            .get(id)?
            .ok_or_else(|| {
                Error::validation(format!("no chat with id {id}"), Some("chat_id".to_string()))
            })?;
        Ok(self.current.insert(chat))
    }

    /// Renames the currently open chat and persists the change.
    ///
    /// # Errors
    ///
    /// Returns a validation error if no chat is open.
    pub fn rename(&mut self, title: &str) -> Result<()> {
        let chat = self
            .current
            .as_mut()
            .ok_or_else(|| Error::validation("no chat is open", None))?;
        chat.rename(title);
        self.store.save(chat)
    }

    /// Deletes a chat by id. If the deleted chat is the current one, the
    /// session is left with no chat open.
    ///
    /// Returns true if a chat was deleted.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let deleted = self.store.delete(id)?;
        if deleted && self.current.as_ref().is_some_and(|c| c.id == id) {
            self.current = None;
        }
        Ok(deleted)
    }

    /// Lists summaries of all stored chats, most recently updated first.
    pub fn list(&self) -> Result<Vec<ChatSummary>> {
        let mut summaries: Vec<ChatSummary> = self
            .store
            .list()?
            .iter()
            .map(|chat| ChatSummary {
                id: chat.id.clone(),
                title: chat.title.clone(),
                message_count: chat.messages.len(),
                updated_at: chat.updated_at,
            })
            .collect();
        summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(summaries)
    }

    /// Returns aggregated stats for the session.
    pub fn stats(&self) -> Result<SessionStats> {
        Ok(SessionStats {
            model: self.config.model.clone(),
            current_chat: self.current.as_ref().map(|c| c.id.clone()),
            message_count: self.current.as_ref().map_or(0, |c| c.messages.len()),
            chat_count: self.store.list()?.len(),
            total_requests: self.request_count,
        })
    }

    /// Sends a user message and renders the response.
    ///
    /// This method:
    /// 1. Appends the user message to the current chat and persists it
    /// 2. Sends the full conversation to the model server
    /// 3. Splits the response into reasoning and visible text and renders both
    /// 4. Appends the assistant response to the chat and persists it
    ///
    /// The user message is persisted before the request goes out, so a failed
    /// request still leaves the user's side of the turn in the history.
    ///
    /// # Errors
    ///
    /// Returns a validation error if no chat is open, or the underlying
    /// client error if the request fails. A connection-style failure is
    /// rendered as a generic "server unreachable" hint before returning.
    pub async fn send(&mut self, user_input: &str, renderer: &mut dyn Renderer) -> Result<()> {
        let chat = self
            .current
            .as_mut()
            .ok_or_else(|| Error::validation("no chat is open (use /new or /open)", None))?;

        chat.push(Message::user(user_input));
        self.store.save(chat)?;

        let wire_messages: Vec<ChatMessage> = chat.messages.iter().map(ChatMessage::from).collect();
        let params = ChatParams::new(self.config.model.clone(), wire_messages);
        self.request_count += 1;

        let response = match self.client.chat(params).await {
            Ok(response) => response,
            Err(err) => {
                renderer.print_error(CONNECTION_HELP);
                return Err(err);
            }
        };

        let split = split_reasoning(&response.content);
        if let Some(reasoning) = &split.reasoning {
            renderer.print_reasoning(reasoning);
            renderer.finish_response();
        }
        renderer.print_text(&split.visible);
        renderer.finish_response();

        // The raw content, reasoning tags included, is what gets stored.
        // Splitting happens again at render time when the chat is reopened.
        chat.push(Message::assistant(&response.content));
        self.store.save(chat)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    fn session_in(dir: &TempDir) -> ChatSession {
        let client = Ollama::new().unwrap();
        let store = ChatStore::new(dir.path().join("history.json"));
        ChatSession::new(client, store, ChatConfig::new())
    }

    #[test]
    fn new_chat_is_persisted_immediately() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir);
        let id = session.new_chat().unwrap().id.clone();

        let listed = session.list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, id);
        assert_eq!(listed[0].message_count, 0);
    }

    #[test]
    fn open_missing_chat_fails() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir);
        let err = session.open("nope").unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn rename_without_open_chat_fails() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir);
        let err = session.rename("title").unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn rename_persists() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir);
        let id = session.new_chat().unwrap().id.clone();
        session.rename("Rust questions").unwrap();

        let mut fresh = session_in(&dir);
        let reopened = fresh.open(&id).unwrap();
        assert_eq!(reopened.title, "Rust questions");
    }

    #[test]
    fn delete_current_chat_clears_session() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir);
        let id = session.new_chat().unwrap().id.clone();
        assert!(session.delete(&id).unwrap());
        assert!(session.current().is_none());
        assert!(!session.delete(&id).unwrap());
    }

    #[test]
    fn delete_other_chat_keeps_current() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir);
        let first = session.new_chat().unwrap().id.clone();
        let second = session.new_chat().unwrap().id.clone();
        assert_ne!(first, second);
        assert!(session.delete(&first).unwrap());
        assert_eq!(session.current().unwrap().id, second);
    }

    #[tokio::test]
    async fn send_without_open_chat_fails() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir);
        let mut renderer = crate::render::PlainTextRenderer::with_color(false);
        let err = session.send("hello", &mut renderer).await.unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn stats_reflect_store() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir);
        session.new_chat().unwrap();
        session.new_chat().unwrap();

        let stats = session.stats().unwrap();
        assert_eq!(stats.chat_count, 2);
        assert_eq!(stats.message_count, 0);
        assert!(stats.current_chat.is_some());
        assert_eq!(stats.total_requests, 0);
    }
}
