use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use std::sync::Arc;

use crate::{ApiState, CatalogState};

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    catalog: &'static str,
    tables: usize,
}

#[derive(Serialize)]
struct VersionResponse {
    version: &'static str,
}

/// Liveness plus a summary of what the planner has loaded.
async fn health_check(State(state): State<Arc<ApiState>>) -> Json<HealthResponse> {
    let catalog = match &*state.catalog.read().await {
        CatalogState::NotLoaded => "not_loaded",
        CatalogState::Ready(_) => "ready",
        CatalogState::Failed(_) => "unavailable",
    };
    let tables = state.store.lock().await.len();

    Json(HealthResponse {
        status: "ok",
        catalog,
        tables,
    })
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse {
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/health", get(health_check))
        .route("/version", get(version))
}
