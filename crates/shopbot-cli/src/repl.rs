//! Interactive REPL (Read-Eval-Print Loop) mode.

use crate::app::App;
use crate::cli::ChatArgs;
use crate::commands;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;

/// Run the interactive REPL.
pub fn run_repl(app: &App, config: &Config, formatter: &Formatter) -> Result<()> {
    println!(
        "{}",
        formatter.info("Shopbot - Ask about products, '/help' for commands, '/exit' to quit")
    );
    println!();

    let editor_config = rustyline::Config::builder()
        .max_history_size(config.settings.history_size)?
        .auto_add_history(false)
        .build();
    let mut editor = DefaultEditor::with_config(editor_config)?;

    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    loop {
        match editor.readline("shopbot> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_repl_line(line) {
                    ReplCommand::Exit => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    ReplCommand::Help => print_help(formatter),
                    ReplCommand::Unknown(cmd) => {
                        eprintln!(
                            "{}",
                            formatter.error(&format!(
                                "Unknown command: {}. Type '/help' for available commands.",
                                cmd
                            ))
                        );
                    }
                    command => match execute_repl_command(command, app, formatter) {
                        Ok(output) => println!("{}", output),
                        Err(e) => eprintln!("{}", formatter.error(&e.to_string())),
                    },
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use '/exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    editor.save_history(&history_path).ok();

    Ok(())
}

/// REPL command type.
#[derive(Debug, PartialEq, Eq)]
enum ReplCommand {
    Exit,
    Help,
    Chats,
    Reset,
    Chat(String),
    Unknown(String),
}

/// Parse a REPL line. Anything not starting with `/` is a question.
fn parse_repl_line(line: &str) -> ReplCommand {
    let line = line.trim();
    let Some(command) = line.strip_prefix('/') else {
        return ReplCommand::Chat(line.to_string());
    };

    match command.trim().to_lowercase().as_str() {
        "exit" | "quit" | "q" => ReplCommand::Exit,
        "help" | "?" => ReplCommand::Help,
        "chats" | "history" => ReplCommand::Chats,
        "reset" => ReplCommand::Reset,
        _ => ReplCommand::Unknown(line.to_string()),
    }
}

/// Execute a REPL command that needs the resolver.
fn execute_repl_command(cmd: ReplCommand, app: &App, formatter: &Formatter) -> Result<String> {
    match cmd {
        ReplCommand::Chat(text) => {
            commands::execute_chat(ChatArgs { text: vec![text] }, app, formatter)
        }
        ReplCommand::Chats => commands::execute_chats(app, formatter),
        ReplCommand::Reset => commands::execute_reset(app, formatter),
        ReplCommand::Exit | ReplCommand::Help | ReplCommand::Unknown(_) => Ok(String::new()),
    }
}

fn get_history_path() -> Result<PathBuf> {
    let data_dir = Config::data_dir()?;
    std::fs::create_dir_all(&data_dir)?;
    Ok(data_dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  <question>          - Ask about products, e.g. 'books under 50'");
    println!("  /chats              - Show the conversation so far");
    println!("  /reset              - Clear the conversation");
    println!("  /help, /?           - Show this help");
    println!("  /exit, /quit, /q    - Exit REPL");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_a_question() {
        assert_eq!(
            parse_repl_line("  electronics under 1000 "),
            ReplCommand::Chat("electronics under 1000".to_string())
        );
    }

    #[test]
    fn test_slash_commands() {
        assert_eq!(parse_repl_line("/exit"), ReplCommand::Exit);
        assert_eq!(parse_repl_line("/Q"), ReplCommand::Exit);
        assert_eq!(parse_repl_line("/help"), ReplCommand::Help);
        assert_eq!(parse_repl_line("/chats"), ReplCommand::Chats);
        assert_eq!(parse_repl_line("/reset"), ReplCommand::Reset);
        assert_eq!(
            parse_repl_line("/dance"),
            ReplCommand::Unknown("/dance".to_string())
        );
    }
}
