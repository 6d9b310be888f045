use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Query, State},
    Json,
};
use rummage::query::params::RawSearchParams;
use rummage::types::FacetResults;
use rummage::RummageError;

use super::search::log_engine_failure;
use super::AppState;
use crate::dto::ApiResponse;

pub async fn facets(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RawSearchParams>,
) -> Result<Json<ApiResponse<FacetResults>>, RummageError> {
    let start = Instant::now();

    let results = state.engine.facets(&params).await.map_err(|e| {
        log_engine_failure(&e, &params, "facets");
        e
    })?;

    tracing::debug!(
        brands = results.brands.len(),
        categories = results.categories.len(),
        elapsed = ?start.elapsed(),
        "facets served"
    );
    Ok(Json(ApiResponse::ok(results)))
}
