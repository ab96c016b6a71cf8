//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use chrono::DateTime;
use colored::*;
use shopbot_domain::{Product, Sender, TranscriptEntry};
use shopbot_engine::Resolution;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Timestamp layout for transcript entries.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a list of products.
    pub fn format_products(&self, products: &[Product]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(
                &products.iter().map(product_json).collect::<Vec<_>>(),
            )?),
            OutputFormat::Table => Ok(self.format_products_table(products)),
        }
    }

    /// Format a single product with its description.
    pub fn format_product(&self, product: &Product) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&product_json(product))?),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["ID", &product.id.to_string()]);
                builder.push_record(["Name", &product.name]);
                builder.push_record(["Category", &product.category]);
                builder.push_record(["Price", &product.price.to_string()]);
                builder.push_record(["Description", &product.description]);

                let mut table = builder.build();
                table.with(Style::rounded());
                Ok(table.to_string())
            }
        }
    }

    /// Format the outcome of a chat query.
    pub fn format_resolution(&self, resolution: &Resolution) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let value = serde_json::json!({
                    "reply": resolution.reply_text(),
                    "delegated": resolution.is_delegated(),
                    "products": resolution.products().iter().map(product_json).collect::<Vec<_>>(),
                });
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Table => {
                let mut out = self.bot_line(resolution.reply_text());
                if !resolution.products().is_empty() {
                    out.push('\n');
                    out.push_str(&self.format_products_table(resolution.products()));
                }
                Ok(out)
            }
        }
    }

    /// Format the transcript.
    pub fn format_transcript(&self, entries: &[TranscriptEntry]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let values: Vec<serde_json::Value> = entries
                    .iter()
                    .map(|e| {
                        serde_json::json!({
                            "id": e.id,
                            "sender": e.sender.as_str(),
                            "text": e.text,
                            "timestamp": format_timestamp(e.timestamp),
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&values)?)
            }
            OutputFormat::Table => {
                if entries.is_empty() {
                    return Ok(self.colorize("No messages yet.", "yellow"));
                }
                let lines: Vec<String> = entries
                    .iter()
                    .map(|e| {
                        let stamp = self.colorize(&format_timestamp(e.timestamp), "cyan");
                        let text = match e.sender {
                            Sender::User => self.user_line(&e.text),
                            Sender::Bot => self.bot_line(&e.text),
                        };
                        format!("[{}] {}", stamp, text)
                    })
                    .collect();
                Ok(lines.join("\n"))
            }
        }
    }

    fn format_products_table(&self, products: &[Product]) -> String {
        if products.is_empty() {
            return self.colorize("No products found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Name", "Category", "Price"]);
        for product in products {
            builder.push_record([
                product.id.to_string(),
                product.name.clone(),
                product.category.clone(),
                product.price.to_string(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Format a line said by the user.
    pub fn user_line(&self, text: &str) -> String {
        format!("{} {}", self.colorize("you:", "magenta"), text)
    }

    /// Format a line said by the bot.
    pub fn bot_line(&self, text: &str) -> String {
        format!("{} {}", self.colorize("bot:", "green"), text)
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            "magenta" => text.magenta().to_string(),
            _ => text.to_string(),
        }
    }
}

fn product_json(product: &Product) -> serde_json::Value {
    serde_json::json!({
        "id": product.id.value(),
        "name": product.name,
        "category": product.category,
        "price": product.price,
        "description": product.description,
    })
}

/// Render seconds since the epoch as UTC `YYYY-MM-DD HH:MM:SS`.
pub fn format_timestamp(secs: u64) -> String {
    i64::try_from(secs)
        .ok()
        .and_then(|s| DateTime::from_timestamp(s, 0))
        .map(|dt| dt.format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_else(|| secs.to_string())
}
