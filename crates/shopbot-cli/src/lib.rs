//! Shopbot CLI library.
//!
//! This library provides the core functionality for the Shopbot command-line
//! interface: configuration, wiring of the query engine, command execution
//! and output formatting.

pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod repl;

pub use app::{build_app, App, Generator};
pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
