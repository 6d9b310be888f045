//! Privileged operations. The gate check happens before the operator runs,
//! so an unauthorized caller never triggers a partial backfill.

use std::sync::Arc;

use axum::{extract::State, http::HeaderMap, Json};
use rummage::backfill::BackfillReport;
use rummage::types::MigrationStats;
use rummage::RummageError;

use super::AppState;
use crate::auth::caller_token;
use crate::dto::ApiResponse;

pub async fn backfill(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<BackfillReport>>, RummageError> {
    require_admin(&state, &headers)?;
    let report = state.operator.run().await?;
    Ok(Json(ApiResponse::ok(report)))
}

pub async fn migrate(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<MigrationStats>>, RummageError> {
    require_admin(&state, &headers)?;
    let stats = state.operator.migrate().await?;
    Ok(Json(ApiResponse::ok(stats)))
}

fn require_admin(state: &AppState, headers: &HeaderMap) -> Result<(), RummageError> {
    if state.gate.is_admin(caller_token(headers)) {
        Ok(())
    } else {
        Err(RummageError::Unauthorized(
            "admin authorization required".to_string(),
        ))
    }
}
