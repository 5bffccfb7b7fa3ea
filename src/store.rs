//! Chat history persistence.
//!
//! The whole history lives in one JSON file holding an array of [`Chat`]
//! records. Every mutation reloads the table, applies the change, and
//! rewrites the file in full; there is no partial update, no transaction, and
//! no index. That matches the storage this front-end replaces: one serialized
//! table under one fixed key.

use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind};
use std::path::{Path, PathBuf};

use serde_json::{from_reader, to_writer_pretty};

use crate::error::{Error, Result};
use crate::observability;
use crate::types::Chat;

/// Default file name for the history table.
pub const DEFAULT_HISTORY_FILE: &str = "ai-chat-history.json";

/// Store for chat records, backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct ChatStore {
    path: PathBuf,
}

impl ChatStore {
    /// Creates a store backed by the given file. The file need not exist yet;
    /// it is created on the first mutation.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lists all chats. A missing backing file is an empty table.
    pub fn list(&self) -> Result<Vec<Chat>> {
        observability::STORE_READS.click();
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(Error::io("failed to open chat history", err)),
        };
        let reader = BufReader::new(file);
        from_reader(reader)
            .map_err(|err| Error::serialization("failed to parse chat history", Some(Box::new(err))))
    }

    /// Returns the chat with the given identifier, if present.
    pub fn get(&self, id: &str) -> Result<Option<Chat>> {
        Ok(self.list()?.into_iter().find(|chat| chat.id == id))
    }

    /// Saves a chat, replacing any existing record with the same identifier.
    pub fn save(&self, chat: &Chat) -> Result<()> {
        let mut chats = self.list()?;
        match chats.iter_mut().find(|existing| existing.id == chat.id) {
            Some(existing) => *existing = chat.clone(),
            None => chats.push(chat.clone()),
        }
        self.write_all(&chats)
    }

    /// Deletes the chat with the given identifier, immediately and
    /// irreversibly. Returns whether a record was removed.
    pub fn delete(&self, id: &str) -> Result<bool> {
        let mut chats = self.list()?;
        let before = chats.len();
        chats.retain(|chat| chat.id != id);
        if chats.len() == before {
            return Ok(false);
        }
        self.write_all(&chats)?;
        Ok(true)
    }

    fn write_all(&self, chats: &[Chat]) -> Result<()> {
        observability::STORE_WRITES.click();
        let file = File::create(&self.path)
            .map_err(|err| Error::io("failed to create chat history file", err))?;
        let writer = BufWriter::new(file);
        to_writer_pretty(writer, chats).map_err(|err| {
            Error::serialization("failed to serialize chat history", Some(Box::new(err)))
        })
    }
}
