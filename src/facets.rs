//! Facet aggregation over candidate sets.
//!
//! These are pure functions: the engine fetches the per-dimension candidate
//! sets (each with the dimension's own filter removed) and hands them here
//! for counting. A product counts at most once per distinct value even when
//! several of its variants share that value.

use std::collections::{BTreeSet, HashMap};

use crate::types::{Category, CategoryId, FacetValue, PriceRange, Product, RatingTiers, Variant};

/// Category facet: value is the category id, label its display name.
pub fn category_counts(
    products: &[Product],
    categories: &HashMap<CategoryId, Category>,
) -> Vec<FacetValue> {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for product in products {
        *counts.entry(product.category_id.as_str()).or_default() += 1;
    }

    let mut values: Vec<FacetValue> = counts
        .into_iter()
        .map(|(id, count)| FacetValue {
            value: id.to_string(),
            label: categories
                .get(id)
                .map(|c| c.name.clone())
                .unwrap_or_else(|| id.to_string()),
            count,
        })
        .collect();
    sort_facet_values(&mut values);
    values
}

/// Brand facet. Grouping is case-insensitive; the label keeps the first
/// casing seen.
pub fn brand_counts(products: &[Product]) -> Vec<FacetValue> {
    let mut counts: HashMap<String, (String, u64)> = HashMap::new();
    for product in products {
        let brand = product.brand.trim();
        if brand.is_empty() {
            continue;
        }
        let entry = counts
            .entry(brand.to_lowercase())
            .or_insert_with(|| (brand.to_string(), 0));
        entry.1 += 1;
    }
    collect_facet_values(counts)
}

/// Size/color facets: one count per product per distinct variant value.
pub fn variant_value_counts(
    products: &[Product],
    extract: fn(&Variant) -> Option<&str>,
) -> Vec<FacetValue> {
    let mut counts: HashMap<String, (String, u64)> = HashMap::new();
    for product in products {
        let distinct: BTreeSet<&str> = product
            .variants
            .iter()
            .filter_map(extract)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .collect();
        for value in distinct {
            let entry = counts
                .entry(value.to_lowercase())
                .or_insert_with(|| (value.to_string(), 0));
            entry.1 += 1;
        }
    }
    collect_facet_values(counts)
}

/// Observed `{min, max}` price over the fully filtered set; zeroed when the
/// set is empty.
pub fn price_range(products: &[Product]) -> PriceRange {
    let mut iter = products.iter().map(|p| p.price);
    let first = match iter.next() {
        Some(p) => p,
        None => return PriceRange::default(),
    };
    let (min, max) = iter.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
    PriceRange { min, max }
}

/// Bucket ratings into a 0–5 histogram, then suffix-sum into cumulative
/// "N stars & up" tiers. Each tier is the sum of all buckets >= N, so the
/// counts are non-increasing as the threshold rises.
pub fn rating_tiers(products: &[Product]) -> RatingTiers {
    let mut buckets = [0u64; 6];
    for product in products {
        let idx = product.rating.clamp(0.0, 5.0).floor() as usize;
        buckets[idx.min(5)] += 1;
    }

    let four_plus = buckets[4] + buckets[5];
    let three_plus = four_plus + buckets[3];
    let two_plus = three_plus + buckets[2];
    let one_plus = two_plus + buckets[1];
    RatingTiers {
        four_plus,
        three_plus,
        two_plus,
        one_plus,
    }
}

fn collect_facet_values(counts: HashMap<String, (String, u64)>) -> Vec<FacetValue> {
    let mut values: Vec<FacetValue> = counts
        .into_values()
        .map(|(label, count)| FacetValue {
            value: label.clone(),
            label,
            count,
        })
        .collect();
    sort_facet_values(&mut values);
    values
}

/// Count descending, then value ascending — deterministic output order.
fn sort_facet_values(values: &mut [FacetValue]) {
    values.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
}
