//! Configuration types for the chat application.
//!
//! This module provides CLI argument parsing via `arrrg` and configuration
//! structures for controlling chat behavior.

use std::path::PathBuf;

use arrrg_derive::CommandLine;

use crate::store::DEFAULT_HISTORY_FILE;
use crate::types::Model;

/// Command-line arguments for the stellar-chat tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ChatArgs {
    /// Model to use for chat.
    #[arrrg(optional, "Model to use (default: deepseek-r1:1.5b)", "MODEL")]
    pub model: Option<String>,

    /// Base URL of the model server.
    #[arrrg(optional, "Base URL of the model server", "URL")]
    pub url: Option<String>,

    /// Path to the chat history file.
    #[arrrg(optional, "Path to the chat history file", "FILE")]
    pub history: Option<String>,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,
}

/// Configuration for a chat session.
///
/// This struct holds the resolved configuration values after processing
/// command-line arguments with appropriate defaults.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// The model to use for generating responses.
    pub model: Model,

    /// Optional base URL override for the model server.
    /// `None` means the client default (http://localhost:11434/).
    pub base_url: Option<String>,

    /// Path to the chat history file.
    pub history_path: PathBuf,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,
}

impl ChatConfig {
    /// Creates a new ChatConfig with default values.
    ///
    /// Defaults:
    /// - Model: deepseek-r1:1.5b
    /// - Server: client default (http://localhost:11434/)
    /// - History: ai-chat-history.json in the current directory
    /// - Color: enabled
    pub fn new() -> Self {
        Self {
            model: Model::default_model(),
            base_url: None,
            history_path: PathBuf::from(DEFAULT_HISTORY_FILE),
            use_color: true,
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    /// Sets the base URL of the model server.
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the history file path.
    pub fn with_history_path(mut self, path: PathBuf) -> Self {
        self.history_path = path;
        self
    }

    /// Disables ANSI color output.
    pub fn without_color(mut self) -> Self {
        self.use_color = false;
        self
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ChatArgs> for ChatConfig {
    fn from(args: ChatArgs) -> Self {
        let model = args
            .model
            .map(|s| s.parse::<Model>().unwrap_or(Model::Custom(s)))
            .unwrap_or_else(Model::default_model);

        ChatConfig {
            model,
            base_url: args.url,
            history_path: args
                .history
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_HISTORY_FILE)),
            use_color: !args.no_color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::types::KnownModel;

    #[test]
    fn default_config() {
        let config = ChatConfig::new();
        assert_eq!(config.model, Model::Known(KnownModel::DeepseekR1_1_5B));
        assert!(config.base_url.is_none());
        assert_eq!(config.history_path, PathBuf::from(DEFAULT_HISTORY_FILE));
        assert!(config.use_color);
    }

    #[test]
    fn config_from_args_defaults() {
        let args = ChatArgs::default();
        let config = ChatConfig::from(args);
        assert_eq!(config.model, Model::Known(KnownModel::DeepseekR1_1_5B));
        assert_eq!(config.history_path, PathBuf::from(DEFAULT_HISTORY_FILE));
        assert!(config.use_color);
    }

    #[test]
    fn config_from_args_custom() {
        let args = ChatArgs {
            model: Some("qwen2.5-coder:3b".to_string()),
            url: Some("http://10.0.0.2:11434/".to_string()),
            history: Some("/tmp/history.json".to_string()),
            no_color: true,
        };
        let config = ChatConfig::from(args);
        assert_eq!(config.model, Model::Known(KnownModel::Qwen25Coder3B));
        assert_eq!(config.base_url, Some("http://10.0.0.2:11434/".to_string()));
        assert_eq!(config.history_path, PathBuf::from("/tmp/history.json"));
        assert!(!config.use_color);
    }

    #[test]
    fn config_from_args_unknown_model_is_custom() {
        let args = ChatArgs {
            model: Some("llama3:8b".to_string()),
            ..ChatArgs::default()
        };
        let config = ChatConfig::from(args);
        assert_eq!(config.model, Model::Custom("llama3:8b".to_string()));
    }

    #[test]
    fn config_builder_pattern() {
        let config = ChatConfig::new()
            .with_model(Model::Known(KnownModel::DeepseekCoder1_3B))
            .with_base_url("http://example.com:11434/".to_string())
            .with_history_path(PathBuf::from("chats.json"))
            .without_color();

        assert_eq!(config.model, Model::Known(KnownModel::DeepseekCoder1_3B));
        assert_eq!(
            config.base_url,
            Some("http://example.com:11434/".to_string())
        );
        assert_eq!(config.history_path, PathBuf::from("chats.json"));
        assert!(!config.use_color);
    }
}
