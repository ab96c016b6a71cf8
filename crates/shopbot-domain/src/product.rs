//! Product module - catalog items as seen by the query engine

use std::fmt;
use std::str::FromStr;

/// Stable identifier of a catalog item
///
/// Assigned by the catalog store on insert and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProductId(i64);

impl ProductId {
    /// Create a ProductId from a raw value
    ///
    /// This is primarily for storage layer deserialization.
    pub fn from_value(value: i64) -> Self {
        Self(value)
    }

    /// Get the raw value
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProductId {
    type Err = String;

    /// Parse a ProductId from its decimal form
    ///
    /// # Examples
    ///
    /// ```
    /// use shopbot_domain::ProductId;
    ///
    /// let id: ProductId = "42".parse().unwrap();
    /// assert_eq!(id.value(), 42);
    /// assert!("forty-two".parse::<ProductId>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|e| format!("Invalid product id '{}': {}", s, e))
    }
}

/// A purchasable catalog item
///
/// Owned by the catalog store; the engine only reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// Unique identifier
    pub id: ProductId,

    /// Display name
    pub name: String,

    /// Category label (e.g. "Electronics")
    pub category: String,

    /// Price in whole currency units
    pub price: u64,

    /// Free-text description
    pub description: String,
}

/// A catalog item that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    /// Display name
    pub name: String,

    /// Category label
    pub category: String,

    /// Price in whole currency units
    pub price: u64,

    /// Free-text description
    pub description: String,
}

impl NewProduct {
    /// Create a new product record
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        price: u64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            price,
            description: description.into(),
        }
    }

    /// Attach the identifier assigned by the store
    pub fn with_id(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            category: self.category,
            price: self.price,
            description: self.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_ordering() {
        let id1 = ProductId::from_value(1);
        let id2 = ProductId::from_value(2);
        assert!(id1 < id2);
    }

    #[test]
    fn test_product_id_parse() {
        assert_eq!("7".parse::<ProductId>().unwrap(), ProductId::from_value(7));
        assert_eq!(" 12 ".parse::<ProductId>().unwrap().value(), 12);
        assert!("".parse::<ProductId>().is_err());
        assert!("1.5".parse::<ProductId>().is_err());
    }

    #[test]
    fn test_new_product_with_id() {
        let product = NewProduct::new("Kindle Paperwhite", "Electronics", 140, "E-reader")
            .with_id(ProductId::from_value(3));
        assert_eq!(product.id.value(), 3);
        assert_eq!(product.name, "Kindle Paperwhite");
        assert_eq!(product.price, 140);
    }
}
