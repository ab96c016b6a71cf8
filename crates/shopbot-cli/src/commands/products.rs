//! Products command implementation.

use crate::app::App;
use crate::cli::ProductsArgs;
use crate::error::Result;
use crate::output::Formatter;
use shopbot_engine::BrowseParams;
use tracing::info;

/// Execute the products command.
pub fn execute_products(args: ProductsArgs, app: &App, formatter: &Formatter) -> Result<String> {
    let params = BrowseParams::from(args);
    info!("Browsing products with filters: {}", params.query_string());

    let products = app.browse_and_record(&params)?;
    formatter.format_products(&products)
}

impl From<ProductsArgs> for BrowseParams {
    fn from(args: ProductsArgs) -> Self {
        BrowseParams {
            category: args.category,
            min_price: args.min_price,
            max_price: args.max_price,
        }
    }
}
