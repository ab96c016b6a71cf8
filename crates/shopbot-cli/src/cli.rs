//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Shopbot CLI - Ask a product catalog questions in plain language.
#[derive(Debug, Parser)]
#[command(name = "shopbot")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "SHOPBOT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Ask a shopping question
    Chat(ChatArgs),

    /// Browse the catalog with explicit filters
    Products(ProductsArgs),

    /// Show a single product
    Product(ProductArgs),

    /// Show the conversation transcript
    Chats,

    /// Clear the conversation transcript
    Reset,

    /// Import products from a JSON file
    Import(ImportArgs),

    /// Manage the configuration file
    Config(ConfigArgs),

    /// Enter interactive REPL mode
    Repl,
}

/// Arguments for the chat command.
#[derive(Debug, Parser)]
pub struct ChatArgs {
    /// Question text, e.g. "electronics under 1000"
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

/// Arguments for the products command.
///
/// Prices are taken as text and validated by the engine.
#[derive(Debug, Parser)]
pub struct ProductsArgs {
    /// Case-insensitive category substring
    #[arg(long)]
    pub category: Option<String>,

    /// Inclusive lower price bound
    #[arg(long)]
    pub min_price: Option<String>,

    /// Inclusive upper price bound
    #[arg(long)]
    pub max_price: Option<String>,
}

/// Arguments for the product command.
#[derive(Debug, Parser)]
pub struct ProductArgs {
    /// Product ID
    pub id: String,
}

/// Arguments for the import command.
#[derive(Debug, Parser)]
pub struct ImportArgs {
    /// JSON file holding an array of products
    pub file: PathBuf,
}

/// Arguments for the config command.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration file actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration as TOML
    Show,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}
