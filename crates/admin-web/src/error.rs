//! Error types for the admin web interface.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use database::DatabaseError;
use thiserror::Error;

/// Errors that can occur in the admin web interface.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Rejected request input.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Status codes follow the database error kind. `AlreadyExists` and
/// `InvalidReference` are not produced by the current routes; they map to
/// 409 and 422 for write routes that insert files or deliveries.
impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        let status = match &self {
            AdminError::Database(DatabaseError::NotFound { .. }) => StatusCode::NOT_FOUND,
            AdminError::Database(DatabaseError::AlreadyExists { .. }) => StatusCode::CONFLICT,
            AdminError::Database(DatabaseError::InvalidReference { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AdminError::Database(err) => {
                tracing::error!("Database error: {}", err);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AdminError::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        let message = match &self {
            AdminError::Database(err) => err.to_string(),
            AdminError::BadRequest(msg) => msg.clone(),
        };

        let body = serde_json::json!({
            "error": message
        });

        (status, Json(body)).into_response()
    }
}

/// Result type for admin operations.
pub type Result<T> = std::result::Result<T, AdminError>;
