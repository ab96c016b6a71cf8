//! Shopbot Query Engine
//!
//! Turns free-text shopping queries into catalog searches, and falls back to
//! text generation when the catalog has nothing to offer.
//!
//! # Overview
//!
//! A query passes through three steps:
//!
//! ```text
//! Text → extract → ConstraintSet → CatalogStore::find
//!                                    ├─ matches  → summary
//!                                    └─ no match → TextGenerator
//!                                  → TranscriptLog::append_exchange
//! ```
//!
//! The engine owns no storage. Catalog, transcript and generator are the
//! traits from `shopbot-domain`, so tests run against an in-memory store
//! and a mock generator.
//!
//! # Example Usage
//!
//! ```
//! use shopbot_engine::{Resolver, Resolution};
//! use shopbot_domain::NewProduct;
//! use shopbot_domain::traits::CatalogStore;
//! use shopbot_llm::MockGenerator;
//! use shopbot_store::SqliteStore;
//! use std::sync::Arc;
//!
//! let store = Arc::new(SqliteStore::new(":memory:").unwrap());
//! store.insert_product(NewProduct::new("Laptop", "Electronics", 500, "")).unwrap();
//!
//! let resolver = Resolver::new(store.clone(), store, MockGenerator::new("Sorry!"));
//!
//! let resolution = resolver.resolve("Electronics under 1000").unwrap();
//! assert_eq!(
//!     resolution.reply_text(),
//!     "I found 1 products matching your request: Laptop."
//! );
//!
//! let resolution = resolver.resolve("anything under 1").unwrap();
//! assert!(matches!(resolution, Resolution::Delegated { .. }));
//! assert_eq!(resolver.history().unwrap().len(), 4);
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod extractor;
mod resolver;
mod types;

#[cfg(test)]
mod tests;

pub use config::{ResolverConfig, DEFAULT_RESULT_LIMIT};
pub use error::EngineError;
pub use extractor::{extract, CATEGORY_KEYWORDS};
pub use resolver::{summarize, Resolver, NO_PRODUCTS_REPLY};
pub use types::{BrowseParams, ConstraintSet, Resolution};
