//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the query engine and
//! infrastructure. Implementations live in other crates. All methods take
//! `&self`: implementations are expected to be safe to share between
//! concurrent requests and to make each call individually atomic.

use crate::{NewProduct, Product, ProductId, Sender, TranscriptEntry};
use std::sync::Arc;

/// Trait for reading the product catalog
///
/// Implemented by the infrastructure layer (shopbot-store)
pub trait CatalogStore {
    /// Error type for store operations
    type Error;

    /// Find products matching every populated field of the query
    ///
    /// Ordering of the result is defined by the implementation.
    fn find(&self, query: &ProductQuery) -> Result<Vec<Product>, Self::Error>;

    /// Get a product by ID
    fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, Self::Error>;

    /// Insert a new product and return its assigned ID
    fn insert_product(&self, product: NewProduct) -> Result<ProductId, Self::Error>;

    /// Number of products in the catalog
    fn count_products(&self) -> Result<usize, Self::Error>;
}

/// Query criteria for retrieving products
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    /// Case-insensitive substring of the product category
    pub category: Option<String>,

    /// Inclusive lower price bound
    pub min_price: Option<u64>,

    /// Inclusive upper price bound
    pub max_price: Option<u64>,

    /// Maximum results to return
    pub limit: Option<usize>,
}

/// Trait for the append-only chat transcript
///
/// Implemented by the infrastructure layer (shopbot-store)
pub trait TranscriptLog {
    /// Error type for log operations
    type Error;

    /// Append a single line, timestamped at write time
    fn append(&self, sender: Sender, text: &str) -> Result<(), Self::Error>;

    /// Append a user line immediately followed by its bot reply
    ///
    /// Both lines are recorded or neither is.
    fn append_exchange(&self, user_text: &str, bot_text: &str) -> Result<(), Self::Error>;

    /// All entries ordered by timestamp
    fn list_all(&self) -> Result<Vec<TranscriptEntry>, Self::Error>;

    /// Remove every entry
    fn reset_all(&self) -> Result<(), Self::Error>;
}

/// Trait for free-text generation
///
/// Implemented by the infrastructure layer (shopbot-llm)
pub trait TextGenerator {
    /// Error type for generation operations
    type Error;

    /// Generate a completion for the prompt
    fn generate(&self, prompt: &str) -> Result<String, Self::Error>;
}

impl<T: CatalogStore + ?Sized> CatalogStore for Arc<T> {
    type Error = T::Error;

    fn find(&self, query: &ProductQuery) -> Result<Vec<Product>, Self::Error> {
        (**self).find(query)
    }

    fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, Self::Error> {
        (**self).get_by_id(id)
    }

    fn insert_product(&self, product: NewProduct) -> Result<ProductId, Self::Error> {
        (**self).insert_product(product)
    }

    fn count_products(&self) -> Result<usize, Self::Error> {
        (**self).count_products()
    }
}

impl<T: TranscriptLog + ?Sized> TranscriptLog for Arc<T> {
    type Error = T::Error;

    fn append(&self, sender: Sender, text: &str) -> Result<(), Self::Error> {
        (**self).append(sender, text)
    }

    fn append_exchange(&self, user_text: &str, bot_text: &str) -> Result<(), Self::Error> {
        (**self).append_exchange(user_text, bot_text)
    }

    fn list_all(&self) -> Result<Vec<TranscriptEntry>, Self::Error> {
        (**self).list_all()
    }

    fn reset_all(&self) -> Result<(), Self::Error> {
        (**self).reset_all()
    }
}

impl<T: TextGenerator + ?Sized> TextGenerator for Arc<T> {
    type Error = T::Error;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        (**self).generate(prompt)
    }
}
