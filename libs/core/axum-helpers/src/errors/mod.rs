pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fmt::Display;
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Body of every error response.
///
/// ```json
/// {
///   "success": false,
///   "message": "Insufficient stock. Available: 12, Required: 100",
///   "code": "INSUFFICIENT_STOCK",
///   "details": { "available": 12, "required": 100 }
/// }
/// ```
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `false`
    pub success: bool,
    pub message: String,
    pub code: ErrorCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

/// A taxonomy error: code, message, optional details and an optional
/// status override.
#[derive(Debug, Clone, Error)]
#[error("[{code}] {message}")]
pub struct AppError {
    code: ErrorCode,
    message: String,
    details: Option<Value>,
    status: Option<StatusCode>,
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
            status: None,
        }
    }

    /// Error with the code's default message.
    pub fn from_code(code: ErrorCode) -> Self {
        Self::new(code, code.default_message())
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Replace the status hint for this error only.
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// The override if one was set, otherwise the code's hint.
    pub fn status(&self) -> StatusCode {
        self.status.unwrap_or_else(|| self.code.status_hint())
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    pub fn missing_required_field(field: &str) -> Self {
        Self::new(
            ErrorCode::MissingRequiredField,
            format!("Missing required field: {}", field),
        )
        .with_details(json!({ "field": field }))
    }

    pub fn invalid_format(field: &str) -> Self {
        Self::new(
            ErrorCode::InvalidFormat,
            format!("Invalid format for field: {}", field),
        )
        .with_details(json!({ "field": field }))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    pub fn product_not_found(id: &str) -> Self {
        Self::new(
            ErrorCode::ProductNotFound,
            format!("Product with ID {} not found", id),
        )
        .with_details(json!({ "id": id }))
    }

    pub fn user_not_found(id: &str) -> Self {
        Self::new(
            ErrorCode::UserNotFound,
            format!("User with ID {} not found", id),
        )
        .with_details(json!({ "id": id }))
    }

    pub fn business_rule(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BusinessRule, message)
    }

    pub fn insufficient_stock(available: i64, required: i64) -> Self {
        Self::new(
            ErrorCode::InsufficientStock,
            format!(
                "Insufficient stock. Available: {}, Required: {}",
                available, required
            ),
        )
        .with_details(json!({ "available": available, "required": required }))
    }

    pub fn duplicate_entry(field: &str, value: &str) -> Self {
        Self::new(
            ErrorCode::DuplicateEntry,
            format!("Duplicate entry for {}: {}", field, value),
        )
        .with_details(json!({ "field": field, "value": value }))
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    pub fn connection(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConnectionError, message)
    }

    pub fn migration(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::MigrationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    pub fn unauthorized() -> Self {
        Self::from_code(ErrorCode::Unauthorized)
    }

    pub fn forbidden() -> Self {
        Self::from_code(ErrorCode::Forbidden)
    }

    pub fn token_expired() -> Self {
        Self::from_code(ErrorCode::TokenExpired)
    }

    /// Wraps an error from outside the taxonomy as `UNKNOWN_ERROR`, keeping
    /// its text under `details.cause`.
    pub fn from_foreign(err: impl Display) -> Self {
        Self::from_code(ErrorCode::UnknownError).with_details(json!({ "cause": err.to_string() }))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::invalid_input(format!(
            "invalid request body format: {}",
            rejection.body_text()
        ))
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut entries: Vec<Value> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |err| {
                    json!({
                        "field": field,
                        "message": err
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| err.code.to_string()),
                        "value": err.params.get("value").cloned().unwrap_or(Value::Null),
                    })
                })
            })
            .collect();
        entries.sort_by(|a, b| a["field"].as_str().cmp(&b["field"].as_str()));

        AppError::from_code(ErrorCode::ValidationError).with_details(json!({ "errors": entries }))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(
                error_code = self.code.code(),
                code = %self.code,
                status = status.as_u16(),
                details = ?self.details,
                "{}",
                self.message
            );
        } else {
            tracing::warn!(
                error_code = self.code.code(),
                code = %self.code,
                status = status.as_u16(),
                "{}",
                self.message
            );
        }

        let body = Json(ErrorResponse {
            success: false,
            message: self.message,
            code: self.code,
            details: self.details,
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use validator::Validate;

    async fn render(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_display_includes_code_and_message() {
        let err = AppError::product_not_found("p1");
        assert_eq!(err.to_string(), "[PRODUCT_NOT_FOUND] Product with ID p1 not found");
    }

    #[test]
    fn test_insufficient_stock_carries_counts() {
        let err = AppError::insufficient_stock(12, 100);
        assert_eq!(err.code(), ErrorCode::InsufficientStock);
        assert_eq!(err.message(), "Insufficient stock. Available: 12, Required: 100");
        assert_eq!(err.details(), Some(&json!({ "available": 12, "required": 100 })));
        assert_eq!(err.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_missing_required_field_message() {
        let err = AppError::missing_required_field("name");
        assert_eq!(err.message(), "Missing required field: name");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_access_kinds_use_default_messages() {
        assert_eq!(AppError::unauthorized().message(), "Unauthorized access");
        assert_eq!(AppError::forbidden().message(), "Access forbidden");
        assert_eq!(AppError::token_expired().status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_status_override_wins_over_hint() {
        let err = AppError::unauthorized().with_status(StatusCode::NOT_FOUND);
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_from_foreign_keeps_cause() {
        let io = std::io::Error::other("disk on fire");
        let err = AppError::from_foreign(io);
        assert_eq!(err.code(), ErrorCode::UnknownError);
        assert_eq!(err.message(), "An unknown error occurred");
        assert_eq!(err.details(), Some(&json!({ "cause": "disk on fire" })));
    }

    #[derive(Validate)]
    struct Sample {
        #[validate(length(max = 3, message = "too long"))]
        name: String,
    }

    #[test]
    fn test_validation_errors_become_field_list() {
        let sample = Sample {
            name: "abcdef".to_string(),
        };
        let err: AppError = sample.validate().unwrap_err().into();

        assert_eq!(err.code(), ErrorCode::ValidationError);
        assert_eq!(err.message(), "Validation failed");
        let errors = &err.details().unwrap()["errors"];
        assert_eq!(errors[0]["field"], "name");
        assert_eq!(errors[0]["message"], "too long");
        assert_eq!(errors[0]["value"], "abcdef");
    }

    #[tokio::test]
    async fn test_into_response_renders_envelope() {
        let (status, body) = render(AppError::insufficient_stock(5, 7)).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "INSUFFICIENT_STOCK");
        assert_eq!(body["details"]["available"], 5);
        assert_eq!(body["details"]["required"], 7);
    }

    #[tokio::test]
    async fn test_into_response_omits_empty_details() {
        let (status, body) = render(AppError::database("connection reset")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "connection reset");
        assert!(body.get("details").is_none());
    }
}
