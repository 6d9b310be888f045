//! Popularity blending: stored counters vs. live event-log aggregation.
//!
//! A stored counter is a cache hint, not ground truth. The effective value
//! is the stored counter when it is positive, otherwise the live aggregation
//! of matching events — so products the backfill has not reached yet still
//! rank sensibly.

use serde::{Deserialize, Serialize};

use crate::types::{EventType, Product, ProductEvent};

pub const PURCHASE_WEIGHT: f64 = 5.0;
pub const ADD_TO_CART_WEIGHT: f64 = 2.0;
pub const VIEW_WEIGHT: f64 = 0.2;

/// Summed event quantities for one product, grouped by event type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTotals {
    pub views: u64,
    pub adds: u64,
    pub purchases: u64,
}

impl EventTotals {
    /// Fold one event into the totals. Absent quantity counts as 1.
    pub fn record(&mut self, event: &ProductEvent) {
        let qty = event.quantity_or_default();
        match event.event_type {
            EventType::View => self.views += qty,
            EventType::AddToCart => self.adds += qty,
            EventType::Purchase => self.purchases += qty,
        }
    }
}

/// The resolved counters and derived score used for popularity ranking.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EffectiveCounters {
    pub views: u64,
    pub adds: u64,
    pub purchases: u64,
    pub score: f64,
}

/// `purchases*5 + adds*2 + views*0.2`
pub fn popularity_score(views: u64, adds: u64, purchases: u64) -> f64 {
    purchases as f64 * PURCHASE_WEIGHT + adds as f64 * ADD_TO_CART_WEIGHT + views as f64 * VIEW_WEIGHT
}

/// Resolve a product's effective counters: stored-if-positive, else the live
/// totals. The score is always recomputed from the effective counters — the
/// stored `popularity_score` field is ignored here.
pub fn effective_counters(product: &Product, live: Option<&EventTotals>) -> EffectiveCounters {
    let live = live.copied().unwrap_or_default();
    let views = stored_or(product.views, live.views);
    let adds = stored_or(product.add_to_cart_count, live.adds);
    let purchases = stored_or(product.purchase_count, live.purchases);
    EffectiveCounters {
        views,
        adds,
        purchases,
        score: popularity_score(views, adds, purchases),
    }
}

/// Does any of the product's stored counters need the event-log fallback?
pub fn needs_live_totals(product: &Product) -> bool {
    stored_missing(product.views)
        || stored_missing(product.add_to_cart_count)
        || stored_missing(product.purchase_count)
}

fn stored_or(stored: Option<u64>, live: u64) -> u64 {
    match stored {
        Some(v) if v > 0 => v,
        _ => live,
    }
}

fn stored_missing(stored: Option<u64>) -> bool {
    !matches!(stored, Some(v) if v > 0)
}
