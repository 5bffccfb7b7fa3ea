//! Interactive chat application for conversing with locally hosted models.
//!
//! This binary provides a REPL interface for chatting with models served by
//! a local Ollama-compatible server, with persistent chat history.
//!
//! # Usage
//!
//! ```bash
//! # Basic usage with default settings
//! stellar-chat
//!
//! # Specify a model
//! stellar-chat --model qwen2.5-coder:3b
//!
//! # Point at a different server or history file
//! stellar-chat --url http://10.0.0.2:11434/ --history ~/chats.json
//!
//! # Disable colors (useful for piping output)
//! stellar-chat --no-color
//! ```
//!
//! # Commands
//!
//! While chatting, you can use slash commands:
//! - `/help` - Show available commands
//! - `/new` - Start a new chat
//! - `/list` - List stored chats
//! - `/open <id>` - Open a stored chat
//! - `/model <name>` - Change the model
//! - `/quit` - Exit the application

use std::sync::Arc;

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use stellar::chat::{
    ChatArgs, ChatCommand, ChatConfig, ChatSession, ChatSummary, PlainTextRenderer, Renderer,
    help_text, parse_command,
};
use stellar::types::{Chat, MessageRole, Model};
use stellar::{ChatStore, Ollama, StderrLogger, split_reasoning};

/// Main entry point for the stellar-chat application.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = ChatArgs::from_command_line_relaxed("stellar-chat [OPTIONS]");
    let config = ChatConfig::from(args);
    let use_color = config.use_color;

    let client = Ollama::with_options(config.base_url.clone(), None)?
        .with_logger(Arc::new(StderrLogger));
    let store = ChatStore::new(config.history_path.clone());
    let mut session = ChatSession::new(client, store, config);
    let mut renderer = PlainTextRenderer::with_color(use_color);
    let mut rl = DefaultEditor::new()?;

    println!("Stellar Chat (model: {})", session.config().model);
    println!("Type /help for commands, /quit to exit\n");

    session.new_chat()?;

    loop {
        let readline = rl.readline("You: ");

        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                // Check for slash commands
                if let Some(cmd) = parse_command(line) {
                    match cmd {
                        ChatCommand::Quit => {
                            println!("Goodbye!");
                            break;
                        }
                        ChatCommand::New => match session.new_chat() {
                            Ok(chat) => {
                                renderer.print_info(&format!("Started new chat {}.", chat.id))
                            }
                            Err(err) => {
                                renderer.print_error(&format!("Failed to start chat: {}", err))
                            }
                        },
                        ChatCommand::List => match session.list() {
                            Ok(summaries) => print_chat_list(&summaries),
                            Err(err) => {
                                renderer.print_error(&format!("Failed to list chats: {}", err))
                            }
                        },
                        ChatCommand::Open(id) => match session.open(&id) {
                            Ok(chat) => {
                                println!("Opened chat {} ({})", chat.id, chat.title);
                                replay_chat(chat, &mut renderer);
                            }
                            Err(err) => {
                                renderer.print_error(&format!("Failed to open chat: {}", err))
                            }
                        },
                        ChatCommand::Title(title) => match session.rename(&title) {
                            Ok(()) => renderer.print_info(&format!("Chat renamed to: {}", title)),
                            Err(err) => {
                                renderer.print_error(&format!("Failed to rename chat: {}", err))
                            }
                        },
                        ChatCommand::Delete(id) => {
                            let id = match id.or_else(|| session.current().map(|c| c.id.clone())) {
                                Some(id) => id,
                                None => {
                                    renderer.print_error("No chat is open and no id was given.");
                                    continue;
                                }
                            };
                            match session.delete(&id) {
                                Ok(true) => renderer.print_info(&format!("Deleted chat {}.", id)),
                                Ok(false) => {
                                    renderer.print_error(&format!("No chat with id {}.", id))
                                }
                                Err(err) => {
                                    renderer.print_error(&format!("Failed to delete chat: {}", err))
                                }
                            }
                        }
                        ChatCommand::Model(model_name) => {
                            let model = model_name
                                .parse()
                                .unwrap_or_else(|_| Model::Custom(model_name.clone()));
                            session.set_model(model);
                            renderer.print_info(&format!("Model changed to: {}", model_name));
                        }
                        ChatCommand::Stats => match session.stats() {
                            Ok(stats) => {
                                println!("    Session Statistics:");
                                println!("      Model: {}", stats.model);
                                match stats.current_chat {
                                    Some(ref id) => println!("      Current chat: {}", id),
                                    None => println!("      Current chat: (none)"),
                                }
                                println!("      Messages: {}", stats.message_count);
                                println!("      Stored chats: {}", stats.chat_count);
                                println!("      Requests: {}", stats.total_requests);
                            }
                            Err(err) => {
                                renderer.print_error(&format!("Failed to read stats: {}", err))
                            }
                        },
                        ChatCommand::Help => {
                            for line in help_text().lines() {
                                println!("    {}", line);
                            }
                        }
                        ChatCommand::Invalid(message) => {
                            renderer.print_error(&message);
                        }
                    }
                    continue;
                }

                // Regular message - send to the server
                println!("Assistant:");
                if let Err(e) = session.send(line, &mut renderer).await {
                    renderer.print_error(&e.to_string());
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C at prompt - soft interrupt
                println!();
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D - exit
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                renderer.print_error(&format!("Input error: {}", err));
                break;
            }
        }
    }

    Ok(())
}

fn print_chat_list(summaries: &[ChatSummary]) {
    if summaries.is_empty() {
        println!("    No stored chats.");
        return;
    }
    println!("    Stored chats:");
    for summary in summaries {
        println!(
            "      {}  {} ({} messages)",
            summary.id, summary.title, summary.message_count
        );
    }
}

/// Replays a chat's messages to the terminal. Assistant messages are stored
/// with their reasoning tags intact and are split here, at render time.
fn replay_chat(chat: &Chat, renderer: &mut dyn Renderer) {
    for message in &chat.messages {
        match message.role {
            MessageRole::User => {
                println!("You: {}", message.content);
            }
            MessageRole::Assistant => {
                println!("Assistant:");
                let split = split_reasoning(&message.content);
                if let Some(reasoning) = &split.reasoning {
                    renderer.print_reasoning(reasoning);
                    renderer.finish_response();
                }
                renderer.print_text(&split.visible);
                renderer.finish_response();
            }
        }
    }
}
