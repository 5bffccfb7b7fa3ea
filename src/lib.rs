// Public modules
pub mod chat;
pub mod client;
pub mod client_logger;
pub mod error;
pub mod observability;
pub mod reasoning;
pub mod render;
pub mod store;
pub mod types;
pub mod utils;

// Re-exports
pub use client::Ollama;
pub use client_logger::{ClientLogger, StderrLogger};
pub use error::{Error, Result};
pub use reasoning::{SplitContent, split_reasoning};
pub use render::{PlainTextRenderer, Renderer};
pub use store::ChatStore;
pub use types::*;
