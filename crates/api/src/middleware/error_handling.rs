//! # Error Handling Middleware
//!
//! Maps `PlannerError` to HTTP status codes and a JSON `{"error": ...}`
//! body, so every handler can return `Result<_, AppError>` and use `?`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use coursegrid_core::errors::PlannerError;
use serde_json::json;
use tracing::error;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use coursegrid_api::middleware::error_handling::AppError;
/// use coursegrid_core::errors::PlannerError;
///
/// async fn handler(id: String) -> Result<Json<String>, AppError> {
///     Err(AppError(PlannerError::NotFound(format!("Table {} not found", id))))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub PlannerError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            PlannerError::NotFound(_) => StatusCode::NOT_FOUND,
            PlannerError::DuplicateId(_) | PlannerError::LastTable(_) => StatusCode::CONFLICT,
            PlannerError::Validation(_) => StatusCode::BAD_REQUEST,
            PlannerError::CatalogUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            PlannerError::Worker(_) | PlannerError::Catalog(_) | PlannerError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self.0);
        }

        let body = Json(json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

impl From<PlannerError> for AppError {
    fn from(err: PlannerError) -> Self {
        AppError(err)
    }
}
