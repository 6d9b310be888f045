use std::sync::Arc;

use rummage::backfill::BackfillOperator;
use rummage::SearchEngine;

use crate::auth::AdminGate;

pub mod admin;
pub mod facets;
pub mod health;
pub mod search;

pub use admin::{backfill, migrate};
pub use facets::facets;
pub use health::health;
pub use search::search;

pub struct AppState {
    pub engine: Arc<SearchEngine>,
    pub operator: BackfillOperator,
    pub gate: Arc<dyn AdminGate>,
}

impl AppState {
    pub fn new(engine: Arc<SearchEngine>, gate: Arc<dyn AdminGate>) -> Self {
        let operator = BackfillOperator::new(engine.store());
        AppState {
            engine,
            operator,
            gate,
        }
    }
}
