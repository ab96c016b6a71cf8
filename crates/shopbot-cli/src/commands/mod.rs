//! Command implementations.
//!
//! Each command returns its rendered output so the binary and the REPL can
//! print it the same way.

pub mod chat;
pub mod chats;
pub mod config;
pub mod import;
pub mod product;
pub mod products;
pub mod reset;

pub use self::chat::execute_chat;
pub use self::chats::execute_chats;
pub use self::config::execute_config;
pub use self::import::execute_import;
pub use self::product::execute_product;
pub use self::products::execute_products;
pub use self::reset::execute_reset;
