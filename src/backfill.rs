//! Backfill and migration operators.
//!
//! Backfill recomputes every stored counter from the event log as a batch of
//! independent per-product upserts. It is idempotent — two runs with no new
//! events write identical values — and safe alongside live reads, which fall
//! back to the event log for anything not yet written. Authorization is the
//! caller's concern; these operators assume a privileged caller.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::popularity::popularity_score;
use crate::store::CatalogStore;
use crate::types::{CounterUpdate, MigrationStats};

/// How many recomputed products the backfill response previews.
pub const PREVIEW_LIMIT: usize = 5;
/// Upsert batch size; each batch is logged independently.
const WRITE_BATCH_SIZE: usize = 500;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackfillReport {
    pub updated: usize,
    pub preview_count: usize,
    pub preview: Vec<CounterUpdate>,
}

#[derive(Clone)]
pub struct BackfillOperator {
    store: Arc<dyn CatalogStore>,
}

impl BackfillOperator {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        BackfillOperator { store }
    }

    /// Recompute all counters and popularity scores from the event log.
    pub async fn run(&self) -> Result<BackfillReport> {
        let totals = self.store.all_event_totals().await?;

        let mut updates: Vec<CounterUpdate> = totals
            .into_iter()
            .map(|(product_id, t)| CounterUpdate {
                product_id,
                views: t.views,
                add_to_cart_count: t.adds,
                purchase_count: t.purchases,
                popularity_score: popularity_score(t.views, t.adds, t.purchases),
            })
            .collect();
        // Deterministic write order; also keeps the preview stable.
        updates.sort_by(|a, b| a.product_id.cmp(&b.product_id));

        tracing::info!(products = updates.len(), "backfill: recomputing counters from event log");

        let mut updated = 0;
        for (batch_no, batch) in updates.chunks(WRITE_BATCH_SIZE).enumerate() {
            match self.store.write_counters(batch).await {
                Ok(n) => {
                    updated += n;
                    tracing::debug!(batch = batch_no, written = n, "backfill batch applied");
                }
                Err(e) => {
                    // Partial progress is fine: each product is an
                    // independent unit of work and a retry recomputes the
                    // same totals.
                    tracing::warn!(batch = batch_no, error = %e, "backfill batch failed");
                    return Err(e);
                }
            }
        }

        let preview: Vec<CounterUpdate> = updates.iter().take(PREVIEW_LIMIT).cloned().collect();
        Ok(BackfillReport {
            updated,
            preview_count: preview.len(),
            preview,
        })
    }

    /// Ensure every product has the four counter fields, defaulting absent
    /// ones to zero without overwriting genuine values.
    pub async fn migrate(&self) -> Result<MigrationStats> {
        let stats = self.store.init_counter_defaults().await?;
        tracing::info!(matched = stats.matched, modified = stats.modified, "counter field migration complete");
        Ok(stats)
    }
}
