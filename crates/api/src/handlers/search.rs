use axum::{Json, extract::State};
use coursegrid_core::models::search::{FilterRequest, FilterResponse, RequestId, SearchRequest};
use std::sync::Arc;
use tracing::debug;

use crate::{ApiState, middleware::error_handling::AppError};

/// Runs one filtered page on the worker thread.
#[axum::debug_handler]
pub async fn search(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<SearchRequest>,
) -> Result<Json<FilterResponse>, AppError> {
    let lectures = state.lectures().await?;
    let request = FilterRequest {
        request_id: RequestId::default(),
        lectures,
        search_options: payload.search_options,
        page: payload.page,
        page_size: payload.page_size.unwrap_or(state.page_size),
    };

    let response = state.worker.filter(request).await?;
    debug!(
        "Search {:?} returned {} of {} lectures",
        response.request_id,
        response.items.len(),
        response.total
    );

    Ok(Json(response))
}
