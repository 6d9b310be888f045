//! Query normalization: raw string-keyed request parameters in, a validated
//! [`SearchRequest`] out. No catalog access happens here — category
//! resolution is the predicate compiler's job.

use serde::Deserialize;

use crate::error::{Result, RummageError};
use crate::types::{SearchRequest, SortKey, SortOrder};

/// Default page size when `limit` is absent.
pub const DEFAULT_PAGE_SIZE: u32 = 12;
/// Upper bound for `limit`.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Raw query-string parameters, exactly as they arrive off the wire.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSearchParams {
    pub q: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub min_rating: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// What to do when `minPrice > maxPrice`. The project-wide default is
/// [`Swap`](PriceInversionPolicy::Swap); the alternative is kept because
/// comparable systems reject instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PriceInversionPolicy {
    #[default]
    Swap,
    Reject,
}

/// Validate and normalize raw parameters into a [`SearchRequest`].
///
/// # Errors
///
/// Returns [`RummageError::InvalidParameter`] naming the violated rule:
/// non-positive or non-numeric `page`, `limit` outside `[1, 100]`, negative
/// prices, `minRating` outside `[0, 5]`, unknown `sort`/`order` values, and
/// (under the `Reject` policy) inverted price bounds.
pub fn normalize(
    raw: &RawSearchParams,
    default_limit: u32,
    price_policy: PriceInversionPolicy,
) -> Result<SearchRequest> {
    let page = match &raw.page {
        None => 1,
        Some(s) => {
            let n: u32 = s.trim().parse().map_err(|_| {
                RummageError::InvalidParameter("page must be a positive integer".to_string())
            })?;
            if n < 1 {
                return Err(RummageError::InvalidParameter(
                    "page must be >= 1".to_string(),
                ));
            }
            n
        }
    };

    let limit = match &raw.limit {
        None => default_limit,
        Some(s) => {
            let n: u32 = s.trim().parse().map_err(|_| {
                RummageError::InvalidParameter("limit must be an integer".to_string())
            })?;
            if !(1..=MAX_PAGE_SIZE).contains(&n) {
                return Err(RummageError::InvalidParameter(format!(
                    "limit must be between 1 and {}",
                    MAX_PAGE_SIZE
                )));
            }
            n
        }
    };

    let mut min_price = parse_price(raw.min_price.as_deref(), "minPrice")?;
    let mut max_price = parse_price(raw.max_price.as_deref(), "maxPrice")?;
    if let (Some(lo), Some(hi)) = (min_price, max_price) {
        if lo > hi {
            match price_policy {
                PriceInversionPolicy::Swap => {
                    min_price = Some(hi);
                    max_price = Some(lo);
                }
                PriceInversionPolicy::Reject => {
                    return Err(RummageError::InvalidParameter(
                        "minPrice must not exceed maxPrice".to_string(),
                    ));
                }
            }
        }
    }

    let min_rating = match raw.min_rating.as_deref() {
        None => None,
        Some(s) => {
            let r: f64 = s.trim().parse().map_err(|_| {
                RummageError::InvalidParameter("minRating must be a number".to_string())
            })?;
            if !(0.0..=5.0).contains(&r) {
                return Err(RummageError::InvalidParameter(
                    "minRating must be between 0 and 5".to_string(),
                ));
            }
            Some(r)
        }
    };

    let q = raw
        .q
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    let sort = match raw.sort.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        None => {
            // Relevance is the default when a text query is given; otherwise
            // newest-first.
            if q.is_some() {
                SortKey::Relevance
            } else {
                SortKey::CreatedAt
            }
        }
        Some(s) => SortKey::parse(s).ok_or_else(|| {
            RummageError::InvalidParameter(format!(
                "sort must be one of relevance, price, rating, date, name, popularity (got '{}')",
                s
            ))
        })?,
    };

    let order = match raw.order.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        None => SortOrder::Desc,
        Some(s) => SortOrder::parse(s).ok_or_else(|| {
            RummageError::InvalidParameter(format!("order must be asc or desc (got '{}')", s))
        })?,
    };

    Ok(SearchRequest {
        q,
        category: raw
            .category
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        brands: split_list(raw.brand.as_deref()),
        sizes: split_list(raw.size.as_deref()),
        colors: split_list(raw.color.as_deref()),
        min_price,
        max_price,
        min_rating,
        sort,
        order,
        page,
        limit,
    })
}

fn parse_price(value: Option<&str>, field: &str) -> Result<Option<f64>> {
    match value {
        None => Ok(None),
        Some(s) => {
            let p: f64 = s.trim().parse().map_err(|_| {
                RummageError::InvalidParameter(format!("{} must be a number", field))
            })?;
            if p < 0.0 {
                return Err(RummageError::InvalidParameter(format!(
                    "{} must not be negative",
                    field
                )));
            }
            Ok(Some(p))
        }
    }
}

/// Split a comma-separated list, trimming elements and dropping empties.
fn split_list(value: Option<&str>) -> Vec<String> {
    value
        .map(|s| {
            s.split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
