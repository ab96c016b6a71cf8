//! Reset command implementation.

use crate::app::App;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the reset command.
pub fn execute_reset(app: &App, formatter: &Formatter) -> Result<String> {
    app.reset_history()?;
    Ok(formatter.success("Chat history cleared"))
}
