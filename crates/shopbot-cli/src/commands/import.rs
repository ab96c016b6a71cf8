//! Import command implementation.

use crate::app::App;
use crate::cli::ImportArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use serde::Deserialize;
use shopbot_domain::NewProduct;
use std::fs;

/// Execute the import command.
pub fn execute_import(args: ImportArgs, app: &App, formatter: &Formatter) -> Result<String> {
    let json_data = fs::read_to_string(&args.file)?;
    let products = parse_products(&json_data)?;

    let ids = app.import_products(products)?;
    let total = app.catalog_size()?;

    Ok(formatter.success(&format!(
        "Imported {} product(s); catalog now holds {}",
        ids.len(),
        total
    )))
}

/// Product definition for JSON input.
#[derive(Debug, Deserialize)]
struct ProductDefinition {
    name: String,
    category: String,
    price: u64,
    #[serde(default)]
    description: String,
}

/// Parse and check a JSON array of product definitions.
fn parse_products(json_data: &str) -> Result<Vec<NewProduct>> {
    let defs: Vec<ProductDefinition> = serde_json::from_str(json_data)?;

    if defs.is_empty() {
        return Err(CliError::InvalidInput("No products provided".to_string()));
    }

    defs.into_iter()
        .enumerate()
        .map(|(i, def)| {
            if def.name.trim().is_empty() || def.category.trim().is_empty() {
                return Err(CliError::InvalidInput(format!(
                    "Product #{} needs a name and a category",
                    i + 1
                )));
            }
            Ok(NewProduct::new(def.name, def.category, def.price, def.description))
        })
        .collect()
}
