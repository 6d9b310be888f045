use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, RummageError};
use crate::popularity::EventTotals;
use crate::query::predicate::Predicate;
use crate::store::CatalogStore;
use crate::types::{
    Category, CategoryId, CounterUpdate, MigrationStats, Product, ProductEvent, ProductId,
};

/// A complete catalog snapshot, loadable from JSON (demo seeding, tests).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSeed {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub events: Vec<ProductEvent>,
}

/// In-memory reference implementation of [`CatalogStore`].
///
/// Products and categories live in concurrent maps; the event log is an
/// append-only `Vec` behind an `RwLock`. Reads never block each other, and
/// the backfill write path touches one product at a time.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    products: DashMap<ProductId, Product>,
    categories: DashMap<CategoryId, Category>,
    events: RwLock<Vec<ProductEvent>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed(seed: CatalogSeed) -> Self {
        let store = Self::new();
        for category in seed.categories {
            store.insert_category(category);
        }
        for product in seed.products {
            store.insert_product(product);
        }
        for event in seed.events {
            store.record_event(event);
        }
        store
    }

    pub fn insert_product(&self, product: Product) {
        self.products.insert(product.id.clone(), product);
    }

    pub fn insert_category(&self, category: Category) {
        self.categories.insert(category.id.clone(), category);
    }

    /// Append to the event log. Events are never updated or deleted.
    pub fn record_event(&self, event: ProductEvent) {
        // Lock poisoning only happens if a writer panicked; recover the data.
        let mut log = self.events.write().unwrap_or_else(|e| e.into_inner());
        log.push(event);
    }

    pub fn product(&self, id: &str) -> Option<Product> {
        self.products.get(id).map(|p| p.clone())
    }

    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    fn category_snapshot(&self) -> HashMap<CategoryId, Category> {
        self.categories
            .iter()
            .map(|c| (c.key().clone(), c.value().clone()))
            .collect()
    }

    fn totals_from_log<F>(&self, mut include: F) -> Result<HashMap<ProductId, EventTotals>>
    where
        F: FnMut(&ProductId) -> bool,
    {
        let log = self
            .events
            .read()
            .map_err(|_| RummageError::Store("event log lock poisoned".to_string()))?;

        let mut totals: HashMap<ProductId, EventTotals> = HashMap::new();
        for event in log.iter() {
            if include(&event.product_id) {
                totals
                    .entry(event.product_id.clone())
                    .or_default()
                    .record(event);
            }
        }
        Ok(totals)
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalog {
    async fn resolve_category(&self, id_or_slug: &str) -> Result<Option<Category>> {
        if let Some(category) = self.categories.get(id_or_slug) {
            return Ok(Some(category.clone()));
        }
        Ok(self
            .categories
            .iter()
            .find(|c| c.slug == id_or_slug)
            .map(|c| c.clone()))
    }

    async fn categories(&self) -> Result<Vec<Category>> {
        let mut all: Vec<Category> = self.categories.iter().map(|c| c.clone()).collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn find_products(&self, predicate: &Predicate) -> Result<Vec<Product>> {
        let categories = self.category_snapshot();
        let mut matching: Vec<Product> = self
            .products
            .iter()
            .filter(|p| predicate.matches(p.value(), &categories))
            .map(|p| p.clone())
            .collect();
        // Newest first, id as the final tie-break, so every caller sees the
        // same candidate order.
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(matching)
    }

    async fn event_totals(&self, ids: &[ProductId]) -> Result<HashMap<ProductId, EventTotals>> {
        let wanted: std::collections::HashSet<&ProductId> = ids.iter().collect();
        self.totals_from_log(|id| wanted.contains(id))
    }

    async fn all_event_totals(&self) -> Result<HashMap<ProductId, EventTotals>> {
        self.totals_from_log(|_| true)
    }

    async fn write_counters(&self, updates: &[CounterUpdate]) -> Result<usize> {
        let mut updated = 0;
        for update in updates {
            if let Some(mut product) = self.products.get_mut(&update.product_id) {
                product.views = Some(update.views);
                product.add_to_cart_count = Some(update.add_to_cart_count);
                product.purchase_count = Some(update.purchase_count);
                product.popularity_score = Some(update.popularity_score);
                updated += 1;
            }
        }
        Ok(updated)
    }

    async fn init_counter_defaults(&self) -> Result<MigrationStats> {
        let mut stats = MigrationStats::default();
        for mut product in self.products.iter_mut() {
            let missing = product.views.is_none()
                || product.add_to_cart_count.is_none()
                || product.purchase_count.is_none()
                || product.popularity_score.is_none();
            if !missing {
                continue;
            }
            stats.matched += 1;
            // Null-coalescing: only absent fields are touched.
            product.views.get_or_insert(0);
            product.add_to_cart_count.get_or_insert(0);
            product.purchase_count.get_or_insert(0);
            product.popularity_score.get_or_insert(0.0);
            stats.modified += 1;
        }
        Ok(stats)
    }
}
