//! Chats command implementation.

use crate::app::App;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the chats command.
pub fn execute_chats(app: &App, formatter: &Formatter) -> Result<String> {
    let entries = app.history()?;
    formatter.format_transcript(&entries)
}
