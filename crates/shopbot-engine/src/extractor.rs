//! Heuristic filter extraction from free text
//!
//! A fast, explainable scan: no weighting, no language model. The same text
//! always yields the same constraints.

use crate::types::ConstraintSet;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Known category keywords, tested in order; the first hit wins
pub const CATEGORY_KEYWORDS: &[(&str, &str)] = &[
    ("electronics", "electronics"),
    ("books", "books"),
    ("clothing", "clothing"),
    ("shoes", "shoes"),
    ("home", "home"),
];

static MIN_PRICE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:over|above|more than)\s+(\d+)").expect("valid min price pattern")
});

static MAX_PRICE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:under|below|less than)\s+(\d+)").expect("valid max price pattern")
});

static DECIMAL_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d$").expect("valid decimal digit pattern"));

/// Extract category and price bounds from a shopping query
///
/// Matching is done on the lower-cased text. Absent patterns leave the
/// corresponding field unset; extraction never fails.
///
/// # Examples
///
/// ```
/// use shopbot_engine::extract;
///
/// let constraints = extract("Show me Electronics over 100 and under 500");
/// assert_eq!(constraints.category(), Some("electronics"));
/// assert_eq!(constraints.min_price(), Some(100));
/// assert_eq!(constraints.max_price(), Some(500));
/// ```
pub fn extract(text: &str) -> ConstraintSet {
    let normalized = text.to_lowercase();

    let category = CATEGORY_KEYWORDS
        .iter()
        .find(|(keyword, _)| normalized.contains(keyword))
        .map(|(_, category)| category.to_string());

    let min_price = first_bound(&MIN_PRICE_PATTERN, &normalized);
    let max_price = first_bound(&MAX_PRICE_PATTERN, &normalized);

    let constraints = ConstraintSet::new(category, min_price, max_price);
    debug!("Extracted constraints: {:?}", constraints);
    constraints
}

/// Value of the leftmost match; a number too large for a u64 saturates
fn first_bound(pattern: &Regex, text: &str) -> Option<u64> {
    let digits = pattern.captures(text)?.get(1)?.as_str();
    let value = digits
        .chars()
        .filter_map(digit_value)
        .fold(0u64, |acc, digit| acc.saturating_mul(10).saturating_add(u64::from(digit)));
    if value == u64::MAX {
        debug!("Price bound '{}' saturated to u64::MAX", digits);
    }
    Some(value)
}

fn is_decimal_digit(c: char) -> bool {
    let mut buf = [0u8; 4];
    DECIMAL_DIGIT.is_match(c.encode_utf8(&mut buf))
}

/// Numeric value of a Unicode decimal digit
///
/// Decimal digits always come in contiguous runs of ten starting at zero, so
/// the value is the distance from the start of the run, modulo ten.
fn digit_value(c: char) -> Option<u32> {
    if let Some(value) = c.to_digit(10) {
        return Some(value);
    }
    if !is_decimal_digit(c) {
        return None;
    }
    let mut start = c as u32;
    while let Some(prev) = start.checked_sub(1).and_then(char::from_u32) {
        if !is_decimal_digit(prev) {
            break;
        }
        start -= 1;
    }
    Some((c as u32 - start) % 10)
}
