//! Shopbot Storage Layer
//!
//! Implements the `CatalogStore` and `TranscriptLog` traits on SQLite.
//!
//! # Architecture
//!
//! - One `products` table for the catalog
//! - One append-only `chat_messages` table for the transcript
//! - A single connection behind a mutex, so every trait call is atomic with
//!   respect to other callers and the store can be shared through an `Arc`
//!
//! # Examples
//!
//! ```no_run
//! use shopbot_store::SqliteStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! // Store is now ready for catalog and transcript operations
//! ```

#![warn(missing_docs)]

use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};
use shopbot_domain::traits::{CatalogStore, ProductQuery, TranscriptLog};
use shopbot_domain::{NewProduct, Product, ProductId, Sender, TranscriptEntry};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A previous holder of the connection panicked
    #[error("Store connection lock poisoned")]
    LockPoisoned,
}

/// SQLite-based implementation of the catalog and transcript collaborators
///
/// # Thread Safety
///
/// The connection is guarded by a mutex. Clone an `Arc<SqliteStore>` to hand
/// the same database to several components or threads.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use shopbot_store::SqliteStore;
    ///
    /// let store = SqliteStore::new("shopbot.db").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.lock()?.execute_batch(schema)?;
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::LockPoisoned)
    }

    /// Current wall-clock time in seconds since the Unix epoch
    fn now_secs() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0)
    }

    /// Escape LIKE wildcards so user input is matched literally
    fn escape_like(pattern: &str) -> String {
        let mut escaped = String::with_capacity(pattern.len());
        for c in pattern.chars() {
            if matches!(c, '\\' | '%' | '_') {
                escaped.push('\\');
            }
            escaped.push(c);
        }
        escaped
    }

    /// Prices are unsigned in the domain and signed in SQLite
    fn price_to_sql(price: u64) -> i64 {
        i64::try_from(price).unwrap_or(i64::MAX)
    }

    fn row_to_product(row: &rusqlite::Row<'_>) -> rusqlite::Result<Product> {
        let price: i64 = row.get(3)?;
        let price = u64::try_from(price)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Integer, Box::new(e)))?;

        Ok(Product {
            id: ProductId::from_value(row.get(0)?),
            name: row.get(1)?,
            category: row.get(2)?,
            price,
            description: row.get(4)?,
        })
    }

    fn row_to_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<TranscriptEntry> {
        let sender_str: String = row.get(1)?;
        let sender = Sender::parse(&sender_str).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                1,
                Type::Text,
                Box::new(StoreError::InvalidData(format!("Unknown sender: {}", sender_str))),
            )
        })?;

        Ok(TranscriptEntry {
            id: row.get(0)?,
            sender,
            text: row.get(2)?,
            timestamp: row.get::<_, i64>(3)? as u64,
        })
    }

    /// Insert one transcript line; the timestamp never goes backwards
    fn insert_message(conn: &Connection, sender: Sender, text: &str) -> Result<(), StoreError> {
        conn.execute(
            "INSERT INTO chat_messages (sender, text, timestamp)
             VALUES (?1, ?2, MAX(?3, COALESCE((SELECT MAX(timestamp) FROM chat_messages), 0)))",
            params![sender.as_str(), text, Self::now_secs()],
        )?;
        Ok(())
    }
}

impl CatalogStore for SqliteStore {
    type Error = StoreError;

    fn find(&self, query: &ProductQuery) -> Result<Vec<Product>, Self::Error> {
        let mut sql = String::from(
            "SELECT id, name, category, price, description FROM products WHERE 1=1",
        );
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(category) = &query.category {
            sql.push_str(" AND category LIKE ? ESCAPE '\\'");
            params.push(Box::new(format!("%{}%", Self::escape_like(category))));
        }

        if let Some(min_price) = query.min_price {
            sql.push_str(" AND price >= ?");
            params.push(Box::new(Self::price_to_sql(min_price)));
        }

        if let Some(max_price) = query.max_price {
            sql.push_str(" AND price <= ?");
            params.push(Box::new(Self::price_to_sql(max_price)));
        }

        sql.push_str(" ORDER BY id");

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            params.push(Box::new(i64::try_from(limit).unwrap_or(i64::MAX)));
        }

        let conn = self.lock()?;
        let mut stmt = conn.prepare(&sql)?;
        let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();

        let products = stmt
            .query_map(&param_refs[..], Self::row_to_product)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(products)
    }

    fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, Self::Error> {
        let product = self
            .lock()?
            .query_row(
                "SELECT id, name, category, price, description FROM products WHERE id = ?1",
                params![id.value()],
                Self::row_to_product,
            )
            .optional()?;

        Ok(product)
    }

    fn insert_product(&self, product: NewProduct) -> Result<ProductId, Self::Error> {
        let price = i64::try_from(product.price).map_err(|_| {
            StoreError::InvalidData(format!("Price {} exceeds storage range", product.price))
        })?;

        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO products (name, category, price, description) VALUES (?1, ?2, ?3, ?4)",
            params![&product.name, &product.category, price, &product.description],
        )?;

        Ok(ProductId::from_value(conn.last_insert_rowid()))
    }

    fn count_products(&self) -> Result<usize, Self::Error> {
        let count: i64 = self
            .lock()?
            .query_row("SELECT COUNT(*) FROM products", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

impl TranscriptLog for SqliteStore {
    type Error = StoreError;

    fn append(&self, sender: Sender, text: &str) -> Result<(), Self::Error> {
        let conn = self.lock()?;
        Self::insert_message(&conn, sender, text)
    }

    fn append_exchange(&self, user_text: &str, bot_text: &str) -> Result<(), Self::Error> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        Self::insert_message(&tx, Sender::User, user_text)?;
        Self::insert_message(&tx, Sender::Bot, bot_text)?;
        tx.commit()?;
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<TranscriptEntry>, Self::Error> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, sender, text, timestamp FROM chat_messages ORDER BY timestamp, id",
        )?;

        let entries = stmt
            .query_map([], Self::row_to_entry)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    fn reset_all(&self) -> Result<(), Self::Error> {
        let removed = self.lock()?.execute("DELETE FROM chat_messages", [])?;
        debug!("Transcript reset, {} entries removed", removed);
        Ok(())
    }
}
