use axum::response::{IntoResponse, Response};

use super::AppError;

/// Router fallback: renders unknown routes with the standard error envelope.
pub async fn not_found() -> Response {
    AppError::not_found("The requested resource was not found").into_response()
}
