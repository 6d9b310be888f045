//! # Rummage
//!
//! Product search, ranking, and faceted filtering for retail catalogs.
//! Rummage turns a free-text query plus structural filters into a ranked,
//! paginated result page and a set of facet counts with correct per-field
//! exclusion, blending denormalized popularity counters with a raw
//! append-only event log that may be out of sync.
//!
//! Rummage can be embedded as a library over any [`store::CatalogStore`]
//! implementation, or run as a standalone HTTP service via the companion
//! `rummage-server` crate.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use rummage::query::params::RawSearchParams;
//! use rummage::store::MemoryCatalog;
//! use rummage::SearchEngine;
//!
//! # async fn run() -> rummage::Result<()> {
//! let catalog = Arc::new(MemoryCatalog::new());
//! // ... seed products, categories, events ...
//! let engine = SearchEngine::new(catalog);
//!
//! let params = RawSearchParams {
//!     q: Some("nike".to_string()),
//!     ..Default::default()
//! };
//! let page = engine.search(&params).await?;
//! println!("{} matches", page.pagination.total);
//!
//! let facets = engine.facets(&params).await?;
//! println!("{} brands", facets.brands.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature flags
//!
//! | Feature | Dependencies | Use case |
//! |---------|-------------|----------|
//! | `axum-support` | axum | [`RummageError`] implements `IntoResponse` |

pub mod backfill;
pub mod engine;
pub mod error;
pub mod facets;
pub mod popularity;
pub mod query;
pub mod store;
pub mod types;

pub use backfill::{BackfillOperator, BackfillReport};
pub use engine::{EngineConfig, SearchEngine};
pub use error::{Result, RummageError};
pub use query::{PriceInversionPolicy, RawSearchParams, SubstringMatcher, TextMatcher};
pub use store::{CatalogStore, MemoryCatalog};
pub use types::*;
