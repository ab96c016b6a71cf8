//! Request and response types for query resolution

use crate::error::EngineError;
use shopbot_domain::traits::ProductQuery;
use shopbot_domain::Product;

/// Structured filter extracted from free text or browse parameters
///
/// `min_price <= max_price` is deliberately not enforced; contradictory
/// bounds simply match nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintSet {
    category: Option<String>,
    min_price: Option<u64>,
    max_price: Option<u64>,
}

impl ConstraintSet {
    /// Create a constraint set from its parts
    pub fn new(category: Option<String>, min_price: Option<u64>, max_price: Option<u64>) -> Self {
        Self {
            category,
            min_price,
            max_price,
        }
    }

    /// Category substring, if any
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Inclusive lower price bound, if any
    pub fn min_price(&self) -> Option<u64> {
        self.min_price
    }

    /// Inclusive upper price bound, if any
    pub fn max_price(&self) -> Option<u64> {
        self.max_price
    }

    /// True when no field is set (the whole catalog matches)
    pub fn is_unconstrained(&self) -> bool {
        self.category.is_none() && self.min_price.is_none() && self.max_price.is_none()
    }

    /// Build the store query for these constraints
    pub fn to_query(&self, limit: Option<usize>) -> ProductQuery {
        ProductQuery {
            category: self.category.clone(),
            min_price: self.min_price,
            max_price: self.max_price,
            limit,
        }
    }
}

/// Outcome of a chat query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The catalog answered the query
    Matched {
        /// Matching products, at most the configured result limit
        products: Vec<Product>,
        /// Deterministic reply listing the matches
        summary: String,
    },

    /// Nothing matched; the reply came from text generation
    Delegated {
        /// Generated reply, verbatim
        generated_text: String,
    },
}

impl Resolution {
    /// The bot's reply for either outcome
    pub fn reply_text(&self) -> &str {
        match self {
            Resolution::Matched { summary, .. } => summary,
            Resolution::Delegated { generated_text } => generated_text,
        }
    }

    /// Matched products (empty when delegated)
    pub fn products(&self) -> &[Product] {
        match self {
            Resolution::Matched { products, .. } => products,
            Resolution::Delegated { .. } => &[],
        }
    }

    /// Whether the reply came from text generation
    pub fn is_delegated(&self) -> bool {
        matches!(self, Resolution::Delegated { .. })
    }
}

/// Raw browse parameters as received at the boundary
///
/// Empty strings count as absent, matching how the catalog filters are
/// usually submitted from forms and query strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowseParams {
    /// Category substring
    pub category: Option<String>,

    /// Lower price bound, unparsed
    pub min_price: Option<String>,

    /// Upper price bound, unparsed
    pub max_price: Option<String>,
}

impl BrowseParams {
    /// Validate the parameters into a constraint set
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidNumericInput` when a price bound is not a
    /// non-negative integer. Bad input is never coerced to zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use shopbot_engine::BrowseParams;
    ///
    /// let params = BrowseParams {
    ///     category: Some("books".to_string()),
    ///     max_price: Some("500".to_string()),
    ///     ..Default::default()
    /// };
    /// let constraints = params.parse().unwrap();
    /// assert_eq!(constraints.max_price(), Some(500));
    ///
    /// let bad = BrowseParams {
    ///     min_price: Some("cheap".to_string()),
    ///     ..Default::default()
    /// };
    /// assert!(bad.parse().is_err());
    /// ```
    pub fn parse(&self) -> Result<ConstraintSet, EngineError> {
        let category = non_empty(self.category.as_deref()).map(str::to_string);
        let min_price = parse_price("min_price", self.min_price.as_deref())?;
        let max_price = parse_price("max_price", self.max_price.as_deref())?;
        Ok(ConstraintSet::new(category, min_price, max_price))
    }

    /// Render the populated parameters as a query string for the transcript
    pub fn query_string(&self) -> String {
        [
            ("category", &self.category),
            ("min_price", &self.min_price),
            ("max_price", &self.max_price),
        ]
        .into_iter()
        .filter_map(|(key, value)| non_empty(value.as_deref()).map(|v| format!("{}={}", key, v)))
        .collect::<Vec<_>>()
        .join("&")
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_price(field: &'static str, raw: Option<&str>) -> Result<Option<u64>, EngineError> {
    match non_empty(raw) {
        None => Ok(None),
        Some(value) => value
            .parse::<u64>()
            .map(Some)
            .map_err(|_| EngineError::InvalidNumericInput {
                field,
                value: value.to_string(),
            }),
    }
}
