//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::Path;

/// Execute the config command.
///
/// Runs before the configuration is loaded so that `init --force` can
/// replace a file that no longer parses.
pub fn execute_config(
    args: ConfigArgs,
    path: Option<&Path>,
    formatter: &Formatter,
) -> Result<String> {
    match args.action {
        ConfigAction::Init { force } => init_config(path, force, formatter),
        ConfigAction::Show => Config::load(path)?.to_toml(),
    }
}

/// Write the default configuration, refusing to clobber an existing file.
fn init_config(path: Option<&Path>, force: bool, formatter: &Formatter) -> Result<String> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => Config::path()?,
    };

    if path.exists() && !force {
        return Err(CliError::Config(format!(
            "{} already exists; pass --force to overwrite it",
            path.display()
        )));
    }

    Config::default().save(Some(&path))?;
    Ok(formatter.success(&format!("Wrote default configuration to {}", path.display())))
}
