use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rummage::SearchEngine;

use crate::auth::{AdminGate, OpenGate, TokenAdminGate};
use crate::handlers::{backfill, facets, health, migrate, search, AppState};

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    /// Privileged routes are open (with a loud warning) when unset.
    pub admin_key: Option<String>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/search", get(search))
        .route("/search/facets", get(facets))
        .route("/admin/backfill", post(backfill))
        .route("/admin/migrate", post(migrate))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn serve(
    engine: Arc<SearchEngine>,
    config: ServerConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .ok();

    let gate: Arc<dyn AdminGate> = match &config.admin_key {
        Some(key) if !key.is_empty() => {
            tracing::info!("admin key authentication enabled");
            Arc::new(TokenAdminGate::new(key.clone()))
        }
        _ => {
            tracing::warn!("no admin key set; privileged routes are unprotected");
            Arc::new(OpenGate)
        }
    };

    let state = Arc::new(AppState::new(engine, gate));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "rummage listening");
    axum::serve(listener, app).await?;
    Ok(())
}
