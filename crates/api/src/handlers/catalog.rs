use axum::{Json, extract::State};
use coursegrid_core::{
    filter::all_majors,
    models::search::{CatalogReloadResponse, MajorsResponse},
};
use std::sync::Arc;

use crate::{ApiState, middleware::error_handling::AppError};

#[axum::debug_handler]
pub async fn majors(State(state): State<Arc<ApiState>>) -> Result<Json<MajorsResponse>, AppError> {
    let lectures = state.lectures().await?;

    Ok(Json(MajorsResponse {
        majors: all_majors(&lectures),
    }))
}

#[axum::debug_handler]
pub async fn reload(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<CatalogReloadResponse>, AppError> {
    let lectures = state.reload_catalog().await?;

    Ok(Json(CatalogReloadResponse { lectures }))
}
