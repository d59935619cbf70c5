use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use coursegrid_core::{
    errors::PlannerError,
    models::{
        schedule::{Day, SlotKey},
        table::{
            AddLectureRequest, AddLectureResponse, DeleteCellResponse, DropRequest, DropResponse,
            DuplicateTableResponse, TableListResponse, TableResponse, UpdateTableRequest,
        },
    },
};
use std::sync::Arc;
use tracing::debug;

use crate::{ApiState, middleware::error_handling::AppError};

#[axum::debug_handler]
pub async fn list_tables(State(state): State<Arc<ApiState>>) -> Json<TableListResponse> {
    let store = state.store.lock().await;

    Json(TableListResponse {
        ids: store.ids().map(str::to_string).collect(),
    })
}

#[axum::debug_handler]
pub async fn get_table(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Json<TableResponse> {
    let store = state.store.lock().await;
    let slots = store.get(&id).to_vec();

    Json(TableResponse { id, slots })
}

#[axum::debug_handler]
pub async fn update_table(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateTableRequest>,
) -> Result<Json<TableResponse>, AppError> {
    let mut store = state.store.lock().await;
    store.update(&id, payload.slots)?;

    Ok(Json(TableResponse {
        slots: store.get(&id).to_vec(),
        id,
    }))
}

#[axum::debug_handler]
pub async fn duplicate_table(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<DuplicateTableResponse>), AppError> {
    let new_id = state.store.lock().await.duplicate(&id)?;

    Ok((StatusCode::CREATED, Json(DuplicateTableResponse { id: new_id })))
}

#[axum::debug_handler]
pub async fn remove_table(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.store.lock().await.remove(&id)?;

    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn add_lecture(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
    Json(payload): Json<AddLectureRequest>,
) -> Result<Json<AddLectureResponse>, AppError> {
    let lectures = state.lectures().await?;
    let lecture = lectures
        .iter()
        .find(|lecture| lecture.id == payload.lecture_id)
        .cloned()
        .ok_or_else(|| {
            PlannerError::NotFound(format!("Lecture with ID {} not found", payload.lecture_id))
        })?;

    let added = state
        .store
        .lock()
        .await
        .add_lecture(&id, Arc::new(lecture))?;

    Ok(Json(AddLectureResponse { added }))
}

#[axum::debug_handler]
pub async fn delete_cell(
    State(state): State<Arc<ApiState>>,
    Path((id, day, period)): Path<(String, String, u32)>,
) -> Result<Json<DeleteCellResponse>, AppError> {
    let day: Day = day
        .parse()
        .map_err(|e| PlannerError::Validation(format!("{}", e)))?;

    let removed = state.store.lock().await.delete_cell(&id, day, period)?;

    Ok(Json(DeleteCellResponse { removed }))
}

/// Commits a finished drag. Rejected drops are not errors: the slot stays
/// where it was and the response says so.
#[axum::debug_handler]
pub async fn drop_slot(
    State(state): State<Arc<ApiState>>,
    Path((id, index)): Path<(String, usize)>,
    Json(payload): Json<DropRequest>,
) -> Json<DropResponse> {
    let key = SlotKey::new(id, index);
    let delta = coursegrid_core::grid::PixelDelta::new(payload.dx, payload.dy);

    let mut store = state.store.lock().await;
    match state.grid.commit_drop(&mut store, &key, delta) {
        Ok(placement) => Json(DropResponse {
            moved: true,
            placement: Some(placement),
            reason: None,
        }),
        Err(reason) => {
            debug!("Ignoring drop of {}: {}", key, reason);
            Json(DropResponse {
                moved: false,
                placement: None,
                reason: Some(reason.to_string()),
            })
        }
    }
}
