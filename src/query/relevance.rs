//! Heuristic relevance scoring for text queries.
//!
//! Signals are additive and independent, so a document can collect several
//! at once and the score has no fixed upper bound. The function is a plain
//! deterministic sum over `(query, document)` — no randomness, no
//! dependence on processing order.

use crate::query::text::TextMatcher;
use crate::types::Product;

pub const W_NAME_PREFIX: f64 = 100.0;
pub const W_BRAND_PREFIX: f64 = 80.0;
pub const W_NAME_CONTAINS: f64 = 60.0;
pub const W_BRAND_CONTAINS: f64 = 50.0;
pub const W_VARIANT_CONTAINS: f64 = 40.0;
pub const W_DESCRIPTION_CONTAINS: f64 = 20.0;

/// The position boost only applies when the query appears within the first
/// this-many characters of the name.
pub const POSITION_BOOST_WINDOW: usize = 100;

/// Score one candidate product against a text query.
pub fn score(product: &Product, query: &str, matcher: &dyn TextMatcher) -> f64 {
    let query = query.trim();
    if query.is_empty() {
        return 0.0;
    }

    let mut score = 0.0;

    if matcher.starts_with(&product.name, query) {
        score += W_NAME_PREFIX;
    }
    if matcher.starts_with(&product.brand, query) {
        score += W_BRAND_PREFIX;
    }
    if matcher.is_match(&product.name, query) {
        score += W_NAME_CONTAINS;
    }
    if matcher.is_match(&product.brand, query) {
        score += W_BRAND_CONTAINS;
    }

    let variant_hit = product.variants.iter().any(|v| {
        v.sku.as_deref().is_some_and(|s| matcher.is_match(s, query))
            || v.color
                .as_deref()
                .is_some_and(|c| matcher.is_match(c, query))
            || v.size
                .as_deref()
                .is_some_and(|s| matcher.is_match(s, query))
    });
    if variant_hit {
        score += W_VARIANT_CONTAINS;
    }

    if matcher.is_match(&product.description, query) {
        score += W_DESCRIPTION_CONTAINS;
    }

    // Earlier occurrences in the name are worth more: 100 - index, only
    // within the first 100 characters, never negative.
    if let Some(idx) = matcher.find(&product.name, query) {
        if idx < POSITION_BOOST_WINDOW {
            score += (POSITION_BOOST_WINDOW - idx) as f64;
        }
    }

    score
}
