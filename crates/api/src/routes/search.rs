use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/search", post(handlers::search::search))
        .route("/api/majors", get(handlers::catalog::majors))
        .route("/api/catalog/reload", post(handlers::catalog::reload))
}
