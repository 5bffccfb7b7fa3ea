// Public modules
pub mod chat;
pub mod chat_chunk;
pub mod chat_request;
pub mod message;
pub mod model;

// Re-exports
pub use chat::Chat;
pub use chat_chunk::{ChatChunk, ChunkMessage};
pub use chat_request::{ChatMessage, ChatParams};
pub use message::{Message, MessageRole};
pub use model::{KnownModel, Model};
