//! Output rendering for the chat front-end.
//!
//! This module provides the renderer trait and a plain-text implementation
//! used by the chat binary.

use std::io::{self, Stdout, Write};

/// ANSI escape code for dim text (used for reasoning segments).
const ANSI_DIM: &str = "\x1b[2m";

/// ANSI escape code for italic text (used for reasoning segments).
const ANSI_ITALIC: &str = "\x1b[3m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// Trait for rendering chat output.
///
/// This abstraction allows for different rendering strategies: plain text
/// with ANSI styling, or plain text without styling for piping/redirecting.
pub trait Renderer: Send {
    /// Print visible response text.
    fn print_text(&mut self, text: &str);

    /// Print a reasoning segment.
    ///
    /// Reasoning segments are displayed differently (dim/italic) to
    /// de-emphasize them relative to the main response.
    fn print_reasoning(&mut self, text: &str);

    /// Print an error message.
    fn print_error(&mut self, error: &str);

    /// Print an informational message.
    fn print_info(&mut self, info: &str);

    /// Called when a response is complete.
    ///
    /// Used to ensure proper newlines and cleanup after output.
    fn finish_response(&mut self);
}

/// Plain text renderer with optional ANSI styling.
pub struct PlainTextRenderer {
    stdout: Stdout,
    use_color: bool,
}

impl PlainTextRenderer {
    /// Creates a new PlainTextRenderer with ANSI colors enabled.
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            use_color: true,
        }
    }

    /// Creates a new PlainTextRenderer with specified color setting.
    pub fn with_color(use_color: bool) -> Self {
        Self {
            stdout: io::stdout(),
            use_color,
        }
    }

    /// Flushes stdout to ensure immediate display.
    fn flush(&mut self) {
        let _ = self.stdout.flush();
    }
}

impl Default for PlainTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for PlainTextRenderer {
    fn print_text(&mut self, text: &str) {
        print!("{text}");
        self.flush();
    }

    fn print_reasoning(&mut self, text: &str) {
        if self.use_color {
            print!("{ANSI_DIM}{ANSI_ITALIC}{text}{ANSI_RESET}");
        } else {
            print!("[reasoning] {text}");
        }
        self.flush();
    }

    fn print_error(&mut self, error: &str) {
        eprintln!("\nError: {error}");
    }

    fn print_info(&mut self, info: &str) {
        println!("{info}");
        self.flush();
    }

    fn finish_response(&mut self) {
        println!();
        self.flush();
    }
}
