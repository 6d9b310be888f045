//! The narrow interface to the catalog store.
//!
//! The engine never talks to a concrete database; everything it needs from
//! the product/category/event collections goes through [`CatalogStore`].
//! [`MemoryCatalog`] is the reference implementation used by tests and the
//! demo server — a document store with pipeline-style aggregation sits
//! behind the same trait in production.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::Result;
use crate::popularity::EventTotals;
use crate::query::predicate::Predicate;
use crate::types::{Category, CounterUpdate, MigrationStats, Product, ProductId};

pub mod memory;

pub use memory::{CatalogSeed, MemoryCatalog};

#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Resolve a category selector — a catalog id first, then a slug.
    /// `Ok(None)` means "no such category", which is an answerable query,
    /// not an error.
    async fn resolve_category(&self, id_or_slug: &str) -> Result<Option<Category>>;

    async fn categories(&self) -> Result<Vec<Category>>;

    /// All products satisfying the predicate, in a deterministic order
    /// (newest first, then id) so downstream sorts are reproducible.
    async fn find_products(&self, predicate: &Predicate) -> Result<Vec<Product>>;

    /// Live event-log aggregation for the given products only.
    async fn event_totals(&self, ids: &[ProductId]) -> Result<HashMap<ProductId, EventTotals>>;

    /// The whole event log grouped by `(product, type)` — the backfill input.
    async fn all_event_totals(&self) -> Result<HashMap<ProductId, EventTotals>>;

    /// Apply counter updates as independent per-product upserts. Returns the
    /// number of products actually updated (unknown ids are skipped).
    async fn write_counters(&self, updates: &[CounterUpdate]) -> Result<usize>;

    /// Ensure every product carries the four counter fields, initializing
    /// absent ones to zero. Never overwrites an existing value.
    async fn init_counter_defaults(&self) -> Result<MigrationStats>;
}
