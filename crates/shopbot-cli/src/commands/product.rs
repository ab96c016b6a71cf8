//! Product command implementation.

use crate::app::App;
use crate::cli::ProductArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use shopbot_domain::ProductId;

/// Execute the product command.
pub fn execute_product(args: ProductArgs, app: &App, formatter: &Formatter) -> Result<String> {
    let id: ProductId = args
        .id
        .parse()
        .map_err(|_| CliError::InvalidInput(format!("Invalid product ID '{}'", args.id)))?;

    let product = app.product_detail(id)?;
    formatter.format_product(&product)
}
