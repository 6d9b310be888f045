use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Query, State},
    Json,
};
use rummage::query::params::RawSearchParams;
use rummage::types::SearchPage;
use rummage::RummageError;

use super::AppState;
use crate::dto::ApiResponse;

pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RawSearchParams>,
) -> Result<Json<ApiResponse<SearchPage>>, RummageError> {
    let start = Instant::now();

    let page = state.engine.search(&params).await.map_err(|e| {
        log_engine_failure(&e, &params, "search");
        e
    })?;

    tracing::debug!(
        total = page.pagination.total,
        page = page.pagination.page,
        elapsed = ?start.elapsed(),
        "search served"
    );
    Ok(Json(ApiResponse::ok(page)))
}

/// Store and deadline failures carry the request parameters so the query
/// can be reproduced from the log.
pub(crate) fn log_engine_failure(e: &RummageError, params: &RawSearchParams, op: &str) {
    match e {
        RummageError::Store(_) | RummageError::DeadlineExceeded(_) => {
            tracing::error!(error = %e, ?params, "{} failed", op);
        }
        _ => {}
    }
}
