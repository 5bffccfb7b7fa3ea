//! Chat application module for interactive conversations with local models.
//!
//! This module provides a REPL chat interface built on top of the stellar
//! client library. It supports:
//!
//! - Persistent chat history across sessions
//! - ANSI-styled output for reasoning segments
//! - Slash commands for chat and session control
//! - Configurable model, server URL, and history location
//!
//! # Architecture
//!
//! The module is organized into several components:
//!
//! - [`config`]: CLI argument parsing and configuration
//! - [`session`]: Core chat session management and server interaction
//! - [`commands`]: Slash command parsing and handling

mod commands;
mod config;
mod session;

pub use crate::render::{PlainTextRenderer, Renderer};
pub use commands::{ChatCommand, help_text, parse_command};
pub use config::{ChatArgs, ChatConfig};
pub use session::{CONNECTION_HELP, ChatSession, ChatSummary, SessionStats};
