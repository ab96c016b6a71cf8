//! Shopbot Domain Layer
//!
//! This crate contains the core value types and collaborator interfaces for
//! Shopbot. It has no external dependencies and defines the concepts that the
//! store, text generation and engine crates build upon.
//!
//! ## Key Concepts
//!
//! - **Product**: A single purchasable catalog item
//! - **ProductQuery**: Filter shape understood by a catalog store
//! - **TranscriptEntry**: One logged line of a user/bot exchange
//!
//! ## Architecture
//!
//! - No external crate dependencies
//! - Trait definitions for every external collaborator
//! - Infrastructure implementations live in other crates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod product;
pub mod traits;
pub mod transcript;

// Re-exports for convenience
pub use product::{NewProduct, Product, ProductId};
pub use transcript::{Sender, TranscriptEntry};
