use axum::{
    Router,
    routing::{delete, get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/tables", get(handlers::tables::list_tables))
        .route(
            "/api/tables/:id",
            get(handlers::tables::get_table)
                .put(handlers::tables::update_table)
                .delete(handlers::tables::remove_table),
        )
        .route(
            "/api/tables/:id/duplicate",
            post(handlers::tables::duplicate_table),
        )
        .route(
            "/api/tables/:id/lectures",
            post(handlers::tables::add_lecture),
        )
        .route(
            "/api/tables/:id/cells/:day/:period",
            delete(handlers::tables::delete_cell),
        )
        .route(
            "/api/tables/:id/slots/:index/drop",
            post(handlers::tables::drop_slot),
        )
}
