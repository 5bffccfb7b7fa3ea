//! Slash command parsing for the chat application.
//!
//! This module handles parsing of special commands that start with `/`,
//! allowing users to manage chats and the session without sending messages
//! to the model server.

/// A parsed chat command.
///
/// These commands control the chat session and are not sent to the server.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatCommand {
    /// Start a new chat.
    New,

    /// List all stored chats.
    List,

    /// Open a stored chat by id.
    Open(String),

    /// Rename the current chat.
    Title(String),

    /// Delete a chat by id, or the current chat when no id is given.
    Delete(Option<String>),

    /// Change the model.
    Model(String),

    /// Display session statistics (chat count, current model, etc.).
    Stats,

    /// Display help information.
    Help,

    /// Exit the chat application.
    Quit,

    /// Report a parsing error back to the caller.
    Invalid(String),
}

/// Parses user input for slash commands.
///
/// Returns `Some(ChatCommand)` if the input is a valid command,
/// or `None` if it should be treated as a regular message.
///
/// # Examples
///
/// ```
/// # use stellar::chat::parse_command;
/// assert!(parse_command("/quit").is_some());
/// assert!(parse_command("/model qwen2.5-coder:3b").is_some());
/// assert!(parse_command("Hello!").is_none());
/// ```
pub fn parse_command(input: &str) -> Option<ChatCommand> {
    let input = input.trim();

    if !input.starts_with('/') {
        return None;
    }

    let mut parts = input[1..].splitn(2, ' ');
    let command = parts.next()?.to_lowercase();
    let argument = parts.next().map(|s| s.trim()).filter(|s| !s.is_empty());

    let result = match command.as_str() {
        "new" => ChatCommand::New,
        "list" | "chats" => ChatCommand::List,
        "open" => match argument {
            Some(id) => ChatCommand::Open(id.to_string()),
            None => ChatCommand::Invalid("/open requires a chat id".to_string()),
        },
        "title" | "rename" => match argument {
            Some(title) => ChatCommand::Title(title.to_string()),
            None => ChatCommand::Invalid("/title requires a title".to_string()),
        },
        "delete" => ChatCommand::Delete(argument.map(|s| s.to_string())),
        "model" => match argument {
            Some(model) => ChatCommand::Model(model.to_string()),
            None => ChatCommand::Invalid("/model requires a model name".to_string()),
        },
        "stats" | "status" => ChatCommand::Stats,
        "help" | "?" => ChatCommand::Help,
        "quit" | "exit" | "q" => ChatCommand::Quit,
        _ => ChatCommand::Invalid(format!("Unknown command: /{}", command)),
    };

    Some(result)
}

/// Returns help text describing available commands.
pub fn help_text() -> &'static str {
    r#"Available commands:
  /new                   Start a new chat
  /list                  List stored chats
  /open <id>             Open a stored chat
  /title <name>          Rename the current chat
  /delete [id]           Delete a chat (current chat if no id given)
  /model <name>          Change the model (e.g., /model qwen2.5-coder:3b)
  /stats                 Show session statistics
  /help                  Show this help message
  /quit                  Exit the chat"#
}
