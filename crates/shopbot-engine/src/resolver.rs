//! Query resolution against the catalog with a text-generation fallback

use crate::config::ResolverConfig;
use crate::error::EngineError;
use crate::extractor::extract;
use crate::types::{BrowseParams, ConstraintSet, Resolution};
use shopbot_domain::traits::{CatalogStore, TextGenerator, TranscriptLog};
use shopbot_domain::{NewProduct, Product, ProductId, TranscriptEntry};
use std::fmt::Display;
use tracing::{debug, info, warn};

/// Reply recorded when a browse request matches nothing
pub const NO_PRODUCTS_REPLY: &str = "No products found.";

/// Answers shopping queries and keeps the conversation transcript
///
/// The resolver holds no mutable state of its own; every call goes through
/// the collaborators, so a single instance can serve concurrent callers as
/// long as they are `Sync`.
pub struct Resolver<C, T, G> {
    catalog: C,
    transcript: T,
    generator: G,
    config: ResolverConfig,
}

impl<C, T, G> Resolver<C, T, G>
where
    C: CatalogStore,
    T: TranscriptLog,
    G: TextGenerator,
    C::Error: Display,
    T::Error: Display,
    G::Error: Display,
{
    /// Create a resolver with the default configuration
    pub fn new(catalog: C, transcript: T, generator: G) -> Self {
        Self {
            catalog,
            transcript,
            generator,
            config: ResolverConfig::default(),
        }
    }

    /// Create a resolver with a specific configuration
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Config` if the configuration is invalid.
    pub fn with_config(
        catalog: C,
        transcript: T,
        generator: G,
        config: ResolverConfig,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            catalog,
            transcript,
            generator,
            config,
        })
    }

    /// Active configuration
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Answer a free-text shopping query
    ///
    /// The text is lower-cased, filters are extracted and the catalog is
    /// searched. With at least one match the reply is a deterministic
    /// summary; otherwise the lower-cased text is handed to the generator.
    /// On success the user line and the reply are appended to the
    /// transcript as one exchange.
    ///
    /// # Errors
    ///
    /// - `EngineError::Store` if the catalog search or transcript write fails
    /// - `EngineError::Generation` if delegation fails; nothing is recorded
    pub fn resolve(&self, text: &str) -> Result<Resolution, EngineError> {
        let normalized = text.to_lowercase();
        let constraints = extract(&normalized);

        let products = self
            .catalog
            .find(&constraints.to_query(Some(self.config.result_limit)))
            .map_err(EngineError::store)?;

        let resolution = if products.is_empty() {
            debug!("No catalog match, delegating to text generation");
            let generated_text = self.generator.generate(&normalized).map_err(|e| {
                warn!("Text generation failed: {}", e);
                EngineError::Generation(e.to_string())
            })?;
            Resolution::Delegated { generated_text }
        } else {
            let summary = summarize(&products);
            Resolution::Matched { products, summary }
        };

        self.transcript
            .append_exchange(&normalized, resolution.reply_text())
            .map_err(EngineError::store)?;

        info!(
            "Resolved query ({}): {} products",
            if resolution.is_delegated() { "delegated" } else { "matched" },
            resolution.products().len()
        );

        Ok(resolution)
    }

    /// Every product satisfying the constraints, without a result cap
    pub fn browse(&self, constraints: &ConstraintSet) -> Result<Vec<Product>, EngineError> {
        self.catalog
            .find(&constraints.to_query(None))
            .map_err(EngineError::store)
    }

    /// Validate raw browse parameters, search, and record the browse
    ///
    /// The transcript receives the populated parameters as the user line
    /// and a count (or "No products found.") as the bot line.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidNumericInput` before touching the
    /// catalog when a price bound does not parse.
    pub fn browse_and_record(&self, params: &BrowseParams) -> Result<Vec<Product>, EngineError> {
        let constraints = params.parse()?;
        let products = self.browse(&constraints)?;

        let reply = if products.is_empty() {
            NO_PRODUCTS_REPLY.to_string()
        } else {
            format!("{} products matched.", products.len())
        };

        self.transcript
            .append_exchange(&params.query_string(), &reply)
            .map_err(EngineError::store)?;

        debug!("Browse recorded: {}", reply);
        Ok(products)
    }

    /// Fetch a single product
    ///
    /// # Errors
    ///
    /// Returns `EngineError::ProductNotFound` if no product has this ID.
    pub fn product_detail(&self, id: ProductId) -> Result<Product, EngineError> {
        self.catalog
            .get_by_id(id)
            .map_err(EngineError::store)?
            .ok_or(EngineError::ProductNotFound(id))
    }

    /// Add products to the catalog, returning their assigned IDs in order
    pub fn import_products(
        &self,
        products: impl IntoIterator<Item = NewProduct>,
    ) -> Result<Vec<ProductId>, EngineError> {
        let ids = products
            .into_iter()
            .map(|product| self.catalog.insert_product(product))
            .collect::<Result<Vec<_>, _>>()
            .map_err(EngineError::store)?;
        info!("Imported {} products", ids.len());
        Ok(ids)
    }

    /// Number of products in the catalog
    pub fn catalog_size(&self) -> Result<usize, EngineError> {
        self.catalog.count_products().map_err(EngineError::store)
    }

    /// Full transcript, oldest first
    pub fn history(&self) -> Result<Vec<TranscriptEntry>, EngineError> {
        self.transcript.list_all().map_err(EngineError::store)
    }

    /// Clear the transcript; the catalog is untouched
    pub fn reset_history(&self) -> Result<(), EngineError> {
        self.transcript.reset_all().map_err(EngineError::store)?;
        info!("Transcript cleared");
        Ok(())
    }
}

/// Deterministic reply listing matched product names in result order
pub fn summarize(products: &[Product]) -> String {
    let names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();
    format!(
        "I found {} products matching your request: {}.",
        products.len(),
        names.join(", ")
    )
}
