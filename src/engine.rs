//! The search engine: compile, fetch, score, sort, paginate.
//!
//! The read path is stateless per request. Independent store reads within a
//! request (the per-dimension facet sets, the category list) run
//! concurrently and are joined before responding; the whole request is
//! bounded by a deadline so a slow store fails the request instead of
//! silently returning partial results.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;

use crate::error::{Result, RummageError};
use crate::facets;
use crate::popularity::{effective_counters, needs_live_totals, EffectiveCounters};
use crate::query::params::{normalize, PriceInversionPolicy, RawSearchParams, DEFAULT_PAGE_SIZE};
use crate::query::predicate::{compile, CompiledQuery, FacetDimension};
use crate::query::relevance;
use crate::query::text::{SubstringMatcher, TextMatcher};
use crate::store::CatalogStore;
use crate::types::{
    Category, CategoryId, FacetResults, Pagination, Product, ProductId, SearchPage, SearchRequest,
    SortKey, SortOrder,
};

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Page size when the request omits `limit`.
    pub default_limit: u32,
    pub price_inversion: PriceInversionPolicy,
    /// Overall budget for one engine call, store reads included.
    pub request_deadline: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            default_limit: DEFAULT_PAGE_SIZE,
            price_inversion: PriceInversionPolicy::default(),
            request_deadline: Duration::from_secs(10),
        }
    }
}

pub struct SearchEngine {
    store: Arc<dyn CatalogStore>,
    matcher: Arc<dyn TextMatcher>,
    config: EngineConfig,
}

impl SearchEngine {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self::with_config(store, EngineConfig::default())
    }

    pub fn with_config(store: Arc<dyn CatalogStore>, config: EngineConfig) -> Self {
        SearchEngine {
            store,
            matcher: Arc::new(SubstringMatcher),
            config,
        }
    }

    /// Swap the text-matching strategy (e.g. for an inverted-index backend).
    /// The relevance weighting contract is unchanged.
    pub fn with_matcher(mut self, matcher: Arc<dyn TextMatcher>) -> Self {
        self.matcher = matcher;
        self
    }

    pub fn store(&self) -> Arc<dyn CatalogStore> {
        Arc::clone(&self.store)
    }

    /// Run a full search: normalize, compile, rank, paginate.
    pub async fn search(&self, raw: &RawSearchParams) -> Result<SearchPage> {
        let req = normalize(raw, self.config.default_limit, self.config.price_inversion)?;
        match timeout(self.config.request_deadline, self.search_request(&req)).await {
            Ok(result) => result,
            Err(_) => Err(RummageError::DeadlineExceeded("search".to_string())),
        }
    }

    /// Compute the facet response for the same request parameters.
    pub async fn facets(&self, raw: &RawSearchParams) -> Result<FacetResults> {
        let req = normalize(raw, self.config.default_limit, self.config.price_inversion)?;
        match timeout(self.config.request_deadline, self.facet_request(&req)).await {
            Ok(result) => result,
            Err(_) => Err(RummageError::DeadlineExceeded("facets".to_string())),
        }
    }

    async fn search_request(&self, req: &SearchRequest) -> Result<SearchPage> {
        let predicate = match compile(req, self.store.as_ref()).await? {
            CompiledQuery::Empty => return Ok(SearchPage::empty(req.page, req.limit)),
            CompiledQuery::Matching(p) => p,
        };

        let mut candidates = self.store.find_products(&predicate).await?;
        let total = candidates.len();
        tracing::debug!(total, sort = ?req.sort, order = ?req.order, "search candidates fetched");

        self.rank(&mut candidates, req).await?;

        let skip = (req.page as usize - 1) * req.limit as usize;
        let data: Vec<Product> = candidates
            .into_iter()
            .skip(skip)
            .take(req.limit as usize)
            .collect();

        Ok(SearchPage {
            data,
            pagination: Pagination::new(req.page, req.limit, total),
        })
    }

    async fn facet_request(&self, req: &SearchRequest) -> Result<FacetResults> {
        let predicate = match compile(req, self.store.as_ref()).await? {
            CompiledQuery::Empty => return Ok(FacetResults::default()),
            CompiledQuery::Matching(p) => p,
        };

        // Each dimension counts with its own filter removed but everything
        // else still applied; price sees the fully filtered set.
        let minus_category = predicate.without(FacetDimension::Category);
        let minus_brand = predicate.without(FacetDimension::Brand);
        let minus_size = predicate.without(FacetDimension::Size);
        let minus_color = predicate.without(FacetDimension::Color);
        let minus_rating = predicate.without(FacetDimension::Rating);

        let store = self.store.as_ref();
        let (category_set, brand_set, size_set, color_set, rating_set, full_set, categories) =
            tokio::try_join!(
                store.find_products(&minus_category),
                store.find_products(&minus_brand),
                store.find_products(&minus_size),
                store.find_products(&minus_color),
                store.find_products(&minus_rating),
                store.find_products(&predicate),
                store.categories(),
            )?;

        let category_map: HashMap<CategoryId, Category> =
            categories.into_iter().map(|c| (c.id.clone(), c)).collect();

        Ok(FacetResults {
            categories: facets::category_counts(&category_set, &category_map),
            brands: facets::brand_counts(&brand_set),
            sizes: facets::variant_value_counts(&size_set, |v| v.size.as_deref()),
            colors: facets::variant_value_counts(&color_set, |v| v.color.as_deref()),
            price_range: facets::price_range(&full_set),
            ratings: facets::rating_tiers(&rating_set),
        })
    }

    async fn rank(&self, candidates: &mut [Product], req: &SearchRequest) -> Result<()> {
        match effective_sort_key(req) {
            SortKey::Relevance => {
                let query = req.q.as_deref().unwrap_or_default();
                let scores: HashMap<ProductId, f64> = candidates
                    .iter()
                    .map(|p| (p.id.clone(), relevance::score(p, query, self.matcher.as_ref())))
                    .collect();
                candidates.sort_by(|a, b| {
                    let primary = directed(cmp_f64(scores[&a.id], scores[&b.id]), req.order);
                    // Relevance ties always break newest-first.
                    primary.then_with(|| b.created_at.cmp(&a.created_at))
                });
            }
            SortKey::Popularity => {
                let counters = self.resolve_popularity(candidates).await?;
                candidates.sort_by(|a, b| {
                    let ca = &counters[&a.id];
                    let cb = &counters[&b.id];
                    let ord = cmp_f64(ca.score, cb.score)
                        .then_with(|| ca.purchases.cmp(&cb.purchases));
                    directed(ord, req.order)
                });
            }
            SortKey::Price => {
                candidates.sort_by(|a, b| directed(cmp_f64(a.price, b.price), req.order));
            }
            SortKey::Rating => {
                candidates.sort_by(|a, b| directed(cmp_f64(a.rating, b.rating), req.order));
            }
            SortKey::CreatedAt => {
                candidates.sort_by(|a, b| directed(a.created_at.cmp(&b.created_at), req.order));
            }
            SortKey::Name => {
                candidates.sort_by(|a, b| {
                    directed(a.name.to_lowercase().cmp(&b.name.to_lowercase()), req.order)
                });
            }
        }
        Ok(())
    }

    /// Effective counters per candidate, hitting the event log only for
    /// products whose stored counters need the live fallback.
    async fn resolve_popularity(
        &self,
        candidates: &[Product],
    ) -> Result<HashMap<ProductId, EffectiveCounters>> {
        let fallback_ids: Vec<ProductId> = candidates
            .iter()
            .filter(|p| needs_live_totals(p))
            .map(|p| p.id.clone())
            .collect();

        let live = if fallback_ids.is_empty() {
            HashMap::new()
        } else {
            tracing::debug!(
                products = fallback_ids.len(),
                "aggregating event log for un-backfilled products"
            );
            self.store.event_totals(&fallback_ids).await?
        };

        Ok(candidates
            .iter()
            .map(|p| (p.id.clone(), effective_counters(p, live.get(&p.id))))
            .collect())
    }
}

/// `sort=relevance` without a text query degrades to newest-first.
fn effective_sort_key(req: &SearchRequest) -> SortKey {
    if req.sort == SortKey::Relevance && req.q.is_none() {
        SortKey::CreatedAt
    } else {
        req.sort
    }
}

fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

fn directed(ord: Ordering, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Asc => ord,
        SortOrder::Desc => ord.reverse(),
    }
}
