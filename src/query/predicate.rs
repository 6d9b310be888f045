//! Predicate compilation: a [`SearchRequest`] becomes an immutable,
//! closed-enum [`Predicate`] the catalog store evaluates per product.
//!
//! Each builder step returns a new value; nothing mutates a shared filter
//! object. Adding a filterable dimension means adding a [`FilterClause`]
//! variant and letting the compiler exhaustiveness checks point at every
//! site that needs updating.

use std::collections::HashMap;

use crate::error::Result;
use crate::store::CatalogStore;
use crate::types::{Category, CategoryId, Product, SearchRequest};

/// A filterable dimension, as used for per-field facet exclusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacetDimension {
    Category,
    Brand,
    Size,
    Color,
    Rating,
}

/// One structural condition a product must satisfy.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterClause {
    /// Resolved category id (slug resolution already happened).
    Category(CategoryId),
    /// Case-insensitive match against any listed brand (OR within the field).
    BrandAny(Vec<String>),
    /// Any variant size matches any listed value.
    SizeAny(Vec<String>),
    /// Any variant color matches any listed value.
    ColorAny(Vec<String>),
    /// Inclusive lower price bound.
    PriceAtLeast(f64),
    /// Inclusive upper price bound.
    PriceAtMost(f64),
    /// Inclusive minimum rating.
    MinRating(f64),
    /// Case-insensitive substring match against name, brand, description,
    /// variant SKU/color/size, or the product's category name/slug.
    Text(String),
}

impl FilterClause {
    fn dimension(&self) -> Option<FacetDimension> {
        match self {
            FilterClause::Category(_) => Some(FacetDimension::Category),
            FilterClause::BrandAny(_) => Some(FacetDimension::Brand),
            FilterClause::SizeAny(_) => Some(FacetDimension::Size),
            FilterClause::ColorAny(_) => Some(FacetDimension::Color),
            FilterClause::MinRating(_) => Some(FacetDimension::Rating),
            FilterClause::PriceAtLeast(_) | FilterClause::PriceAtMost(_) | FilterClause::Text(_) => {
                None
            }
        }
    }
}

/// The compiled structural predicate: a conjunction of [`FilterClause`]s.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predicate {
    clauses: Vec<FilterClause>,
}

impl Predicate {
    pub fn builder() -> PredicateBuilder {
        PredicateBuilder {
            clauses: Vec::new(),
        }
    }

    pub fn clauses(&self) -> &[FilterClause] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// A copy of this predicate with every clause of the given dimension
    /// removed. This is the facet calculator's own-filter exclusion.
    pub fn without(&self, dim: FacetDimension) -> Predicate {
        Predicate {
            clauses: self
                .clauses
                .iter()
                .filter(|c| c.dimension() != Some(dim))
                .cloned()
                .collect(),
        }
    }

    /// Evaluate this predicate against a product. `categories` supplies the
    /// category name/slug for the text clause.
    pub fn matches(&self, product: &Product, categories: &HashMap<CategoryId, Category>) -> bool {
        self.clauses
            .iter()
            .all(|clause| clause_matches(clause, product, categories))
    }
}

/// Value-semantics builder: every step consumes and returns the builder, so
/// a shared predicate can never be mutated in place.
#[derive(Debug, Clone)]
pub struct PredicateBuilder {
    clauses: Vec<FilterClause>,
}

impl PredicateBuilder {
    pub fn category(mut self, id: CategoryId) -> Self {
        self.clauses.push(FilterClause::Category(id));
        self
    }

    pub fn brands(mut self, brands: Vec<String>) -> Self {
        if !brands.is_empty() {
            self.clauses.push(FilterClause::BrandAny(brands));
        }
        self
    }

    pub fn sizes(mut self, sizes: Vec<String>) -> Self {
        if !sizes.is_empty() {
            self.clauses.push(FilterClause::SizeAny(sizes));
        }
        self
    }

    pub fn colors(mut self, colors: Vec<String>) -> Self {
        if !colors.is_empty() {
            self.clauses.push(FilterClause::ColorAny(colors));
        }
        self
    }

    pub fn min_price(mut self, price: f64) -> Self {
        self.clauses.push(FilterClause::PriceAtLeast(price));
        self
    }

    pub fn max_price(mut self, price: f64) -> Self {
        self.clauses.push(FilterClause::PriceAtMost(price));
        self
    }

    pub fn min_rating(mut self, rating: f64) -> Self {
        self.clauses.push(FilterClause::MinRating(rating));
        self
    }

    pub fn text(mut self, query: String) -> Self {
        self.clauses.push(FilterClause::Text(query));
        self
    }

    pub fn build(self) -> Predicate {
        Predicate {
            clauses: self.clauses,
        }
    }
}

/// The outcome of compiling a request.
#[derive(Debug, Clone, PartialEq)]
pub enum CompiledQuery {
    /// An unresolvable category selector: not an error, just "no matches".
    Empty,
    Matching(Predicate),
}

/// Compile a normalized request into a predicate, resolving the category
/// selector (id first, then slug) against the catalog store.
pub async fn compile(req: &SearchRequest, store: &dyn CatalogStore) -> Result<CompiledQuery> {
    let mut builder = Predicate::builder();

    if let Some(selector) = &req.category {
        match store.resolve_category(selector).await? {
            Some(category) => builder = builder.category(category.id),
            None => {
                tracing::debug!(
                    selector = %selector,
                    "category selector did not resolve; short-circuiting to empty result"
                );
                return Ok(CompiledQuery::Empty);
            }
        }
    }

    builder = builder
        .brands(req.brands.clone())
        .sizes(req.sizes.clone())
        .colors(req.colors.clone());

    if let Some(p) = req.min_price {
        builder = builder.min_price(p);
    }
    if let Some(p) = req.max_price {
        builder = builder.max_price(p);
    }
    if let Some(r) = req.min_rating {
        builder = builder.min_rating(r);
    }
    if let Some(q) = &req.q {
        builder = builder.text(q.clone());
    }

    Ok(CompiledQuery::Matching(builder.build()))
}

fn clause_matches(
    clause: &FilterClause,
    product: &Product,
    categories: &HashMap<CategoryId, Category>,
) -> bool {
    match clause {
        FilterClause::Category(id) => product.category_id == *id,
        FilterClause::BrandAny(values) => values.iter().any(|v| eq_ci(&product.brand, v)),
        FilterClause::SizeAny(values) => product.variants.iter().any(|var| {
            var.size
                .as_deref()
                .is_some_and(|s| values.iter().any(|v| eq_ci(s, v)))
        }),
        FilterClause::ColorAny(values) => product.variants.iter().any(|var| {
            var.color
                .as_deref()
                .is_some_and(|c| values.iter().any(|v| eq_ci(c, v)))
        }),
        FilterClause::PriceAtLeast(min) => product.price >= *min,
        FilterClause::PriceAtMost(max) => product.price <= *max,
        FilterClause::MinRating(min) => product.rating >= *min,
        FilterClause::Text(query) => text_matches(product, query, categories),
    }
}

fn text_matches(
    product: &Product,
    query: &str,
    categories: &HashMap<CategoryId, Category>,
) -> bool {
    let q = query.to_lowercase();
    if q.is_empty() {
        return true;
    }

    if contains_ci(&product.name, &q)
        || contains_ci(&product.brand, &q)
        || contains_ci(&product.description, &q)
    {
        return true;
    }

    let variant_hit = product.variants.iter().any(|v| {
        v.sku.as_deref().is_some_and(|s| contains_ci(s, &q))
            || v.color.as_deref().is_some_and(|c| contains_ci(c, &q))
            || v.size.as_deref().is_some_and(|s| contains_ci(s, &q))
    });
    if variant_hit {
        return true;
    }

    // A query naming a category surfaces its products even with no
    // category filter set.
    categories
        .get(&product.category_id)
        .is_some_and(|c| contains_ci(&c.name, &q) || contains_ci(&c.slug, &q))
}

fn eq_ci(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// `needle` must already be lowercased.
fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
