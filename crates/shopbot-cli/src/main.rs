//! Shopbot CLI - Command-line shopping assistant over a local product catalog.

use anyhow::Context;
use clap::Parser;
use shopbot_cli::commands;
use shopbot_cli::config::OutputFormat;
use shopbot_cli::logging::init_logging;
use shopbot_cli::repl;
use shopbot_cli::{build_app, Cli, Command, Config, Formatter};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let command = match cli.command {
        Some(Command::Config(args)) => {
            let format = cli.format.map(Into::into).unwrap_or(OutputFormat::Table);
            let formatter = Formatter::new(format, !cli.no_color);
            let output = commands::execute_config(args, cli.config.as_deref(), &formatter)?;
            println!("{}", output);
            return Ok(());
        }
        other => other,
    };

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    let app = build_app(&config)?;

    let output = match command {
        None | Some(Command::Repl) => {
            repl::run_repl(&app, &config, &formatter)?;
            return Ok(());
        }
        Some(Command::Chat(args)) => commands::execute_chat(args, &app, &formatter)?,
        Some(Command::Products(args)) => commands::execute_products(args, &app, &formatter)?,
        Some(Command::Product(args)) => commands::execute_product(args, &app, &formatter)?,
        Some(Command::Chats) => commands::execute_chats(&app, &formatter)?,
        Some(Command::Reset) => commands::execute_reset(&app, &formatter)?,
        Some(Command::Import(args)) => commands::execute_import(args, &app, &formatter)?,
        Some(Command::Config(_)) => unreachable!("config is handled before loading"),
    };

    println!("{}", output);
    Ok(())
}
