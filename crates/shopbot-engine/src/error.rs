//! Error types for the query engine

use shopbot_domain::ProductId;
use thiserror::Error;

/// Errors that can occur while resolving or browsing
#[derive(Error, Debug)]
pub enum EngineError {
    /// A price bound supplied from outside the extractor is not a non-negative integer
    #[error("Invalid numeric input for {field}: '{value}'")]
    InvalidNumericInput {
        /// Name of the offending parameter
        field: &'static str,
        /// Raw value as received
        value: String,
    },

    /// Text generation collaborator failed
    #[error("Generation error: {0}")]
    Generation(String),

    /// Catalog store or transcript log failed
    #[error("Store error: {0}")]
    Store(String),

    /// No product with the requested ID
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl EngineError {
    pub(crate) fn store(e: impl std::fmt::Display) -> Self {
        EngineError::Store(e.to_string())
    }
}
