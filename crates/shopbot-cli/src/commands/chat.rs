//! Chat command implementation.

use crate::app::App;
use crate::cli::ChatArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;

/// Execute the chat command.
pub fn execute_chat(args: ChatArgs, app: &App, formatter: &Formatter) -> Result<String> {
    let text = args.text.join(" ");
    if text.trim().is_empty() {
        return Err(CliError::InvalidInput("Message text is empty".to_string()));
    }

    let resolution = app.resolve(&text)?;
    formatter.format_resolution(&resolution)
}
