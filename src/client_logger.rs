//! Logging trait for client operations.
//!
//! This module provides the [`ClientLogger`] trait that allows users to
//! capture everything passing through the [`crate::Ollama`] client, including
//! the lines the stream decoder skips.

use crate::types::{ChatChunk, ChatMessage, ChatParams};

/// A trait for logging client operations.
///
/// Implement this trait and attach it with [`crate::Ollama::with_logger`] to
/// record requests, decoded stream chunks, lines skipped by the decoder, and
/// the reassembled message of a completed stream. All methods default to
/// no-ops so implementors only override what they care about.
pub trait ClientLogger: Send + Sync {
    /// Log a chat request about to be sent.
    fn log_request(&self, params: &ChatParams) {
        _ = params;
    }

    /// Log one decoded line of a streaming response.
    fn log_chunk(&self, chunk: &ChatChunk) {
        _ = chunk;
    }

    /// Log a line the decoder skipped because it did not parse as JSON.
    ///
    /// Skipped lines do not terminate the stream; this hook is the only place
    /// they surface.
    fn log_skipped_line(&self, line: &str, error: &serde_json::Error) {
        _ = line;
        _ = error;
    }

    /// Log the reassembled message from a completed stream.
    fn log_message(&self, message: &ChatMessage) {
        _ = message;
    }
}

/// A logger that writes skipped lines to stderr and ignores everything else.
///
/// This is the default attached by the chat binary so that decoder skips are
/// visible without configuring anything.
#[derive(Debug, Default)]
pub struct StderrLogger;

impl ClientLogger for StderrLogger {
    fn log_skipped_line(&self, line: &str, error: &serde_json::Error) {
        eprintln!("skipping unparseable stream line ({error}): {line}");
    }
}
