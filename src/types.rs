use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Product identifier — an opaque catalog id (e.g. a hex ObjectId or UUID).
pub type ProductId = String;
/// Category identifier.
pub type CategoryId = String;

/// A catalog product as this engine sees it.
///
/// The counter fields (`views`, `add_to_cart_count`, `purchase_count`) and
/// `popularity_score` are denormalized caches written by the backfill
/// operator. They are `Option` so that "field absent" (never backfilled,
/// never migrated) is distinguishable from a genuine stored zero — the
/// migration operator relies on that distinction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(alias = "_id")]
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub category_id: CategoryId,
    #[serde(default)]
    pub variants: Vec<Variant>,
    /// Average customer rating in `[0, 5]`.
    #[serde(default)]
    pub rating: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_to_cart_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popularity_score: Option<f64>,
    pub created_at: DateTime<Utc>,
}

/// A purchasable variation of a product. Used here only for filtering,
/// faceting, and text matching — never for inventory reservation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Variant {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default)]
    pub inventory: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    #[serde(alias = "_id")]
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
}

/// The kind of instrumentation event recorded against a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    View,
    AddToCart,
    Purchase,
}

/// One append-only entry in the product event log. Never updated or deleted
/// by this engine; the backfill operator only reads them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductEvent {
    pub product_id: ProductId,
    #[serde(rename = "type")]
    pub event_type: EventType,
    /// Defaults to 1 when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u64>,
    pub occurred_at: DateTime<Utc>,
}

impl ProductEvent {
    pub fn quantity_or_default(&self) -> u64 {
        self.quantity.unwrap_or(1)
    }
}

/// The sort key requested by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Relevance,
    Price,
    Rating,
    CreatedAt,
    Name,
    Popularity,
}

impl SortKey {
    /// Parse a wire value. Accepts both `date` and `createdAt` for the
    /// creation-time sort.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "relevance" => Some(SortKey::Relevance),
            "price" => Some(SortKey::Price),
            "rating" => Some(SortKey::Rating),
            "date" | "createdAt" => Some(SortKey::CreatedAt),
            "name" => Some(SortKey::Name),
            "popularity" => Some(SortKey::Popularity),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }
}

/// A normalized, validated search request. Produced by
/// [`crate::query::params::normalize`]; everything downstream trusts it.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub q: Option<String>,
    /// Raw category selector — either a catalog id or a slug. Resolution
    /// happens at predicate-compile time, not during normalization.
    pub category: Option<String>,
    pub brands: Vec<String>,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_rating: Option<f64>,
    pub sort: SortKey,
    pub order: SortOrder,
    pub page: u32,
    pub limit: u32,
}

/// 1-indexed pagination block returned with every result page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: usize,
    pub pages: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    pub fn new(page: u32, limit: u32, total: usize) -> Self {
        let pages = (total as u64).div_ceil(limit as u64) as u32;
        Pagination {
            page,
            limit,
            total,
            pages,
            has_next: page < pages,
            has_prev: page > 1 && total > 0,
        }
    }
}

/// One ranked, paginated page of results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchPage {
    pub data: Vec<Product>,
    pub pagination: Pagination,
}

impl SearchPage {
    pub fn empty(page: u32, limit: u32) -> Self {
        SearchPage {
            data: Vec::new(),
            pagination: Pagination::new(page, limit, 0),
        }
    }
}

/// A single facet value with its display label and document count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetValue {
    pub value: String,
    pub label: String,
    pub count: u64,
}

/// Observed price bounds over the filtered set. Zeroed when no products match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

/// Cumulative "N stars & up" counts, suffix-summed from a 0–5 histogram.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingTiers {
    #[serde(rename = "4+")]
    pub four_plus: u64,
    #[serde(rename = "3+")]
    pub three_plus: u64,
    #[serde(rename = "2+")]
    pub two_plus: u64,
    #[serde(rename = "1+")]
    pub one_plus: u64,
}

/// The full facet response for one request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetResults {
    pub categories: Vec<FacetValue>,
    pub brands: Vec<FacetValue>,
    pub sizes: Vec<FacetValue>,
    pub colors: Vec<FacetValue>,
    pub price_range: PriceRange,
    pub ratings: RatingTiers,
}

/// Recomputed counters for one product, as written by the backfill operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CounterUpdate {
    pub product_id: ProductId,
    pub views: u64,
    pub add_to_cart_count: u64,
    pub purchase_count: u64,
    pub popularity_score: f64,
}

/// Outcome of the counter-field migration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationStats {
    pub matched: usize,
    pub modified: usize,
}
