use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use core_types::CoreError;
use database::DbError;
use serde_json::json;
use thiserror::Error;
use tracing;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),
    #[error("Validation error: {0}")]
    Validation(#[from] CoreError),
    #[error("Malformed request body: {0}")]
    Body(#[from] JsonRejection),
    #[error("Malformed path: {0}")]
    Path(#[from] PathRejection),
    #[error("Malformed query: {0}")]
    Query(#[from] QueryRejection),
}

/// Converts our custom `AppError` into an HTTP response.
///
/// Client input problems map to 400, unknown installations to 404, and any
/// other store failure to a generic 500.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Database(DbError::NotFound(id)) => {
                tracing::debug!(installation_id = id, "Installation not found.");
                (StatusCode::NOT_FOUND, format!("Installation {} not found", id))
            }
            AppError::Database(db_err) => {
                tracing::error!(error = ?db_err, "Database error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal database error occurred".to_string(),
                )
            }
            AppError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            AppError::Body(rejection) => (StatusCode::BAD_REQUEST, rejection.body_text()),
            AppError::Path(rejection) => (StatusCode::BAD_REQUEST, rejection.body_text()),
            AppError::Query(rejection) => (StatusCode::BAD_REQUEST, rejection.body_text()),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
