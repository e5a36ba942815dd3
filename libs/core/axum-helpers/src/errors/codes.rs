//! The closed set of error kinds exposed by the API.
//!
//! Each code carries:
//! - a wire string clients match on (e.g. `"INSUFFICIENT_STOCK"`)
//! - an integer code for logs and metrics
//! - a default human-readable message
//! - an advisory HTTP status
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//! use axum::http::StatusCode;
//!
//! let code = ErrorCode::InsufficientStock;
//! assert_eq!(code.as_str(), "INSUFFICIENT_STOCK");
//! assert_eq!(code.code(), 1202);
//! assert_eq!(code.status_hint(), StatusCode::CONFLICT);
//! ```

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation (1000s)
    /// One or more fields failed declarative validation
    ValidationError,
    /// Input is well-formed but semantically unacceptable
    InvalidInput,
    /// A required field is absent or empty
    #[serde(rename = "MISSING_REQUIRED_DATA")]
    MissingRequiredField,
    /// A field does not have the expected shape
    InvalidFormat,

    // Not found (1100s)
    NotFound,
    ProductNotFound,
    UserNotFound,

    // Business rules (1200s)
    #[serde(rename = "BUSINESS_LOGIC_ERROR")]
    BusinessRule,
    InsufficientStock,
    DuplicateEntry,

    // Access (1300s)
    Unauthorized,
    Forbidden,
    TokenExpired,

    // Storage (2000s)
    DatabaseError,
    ConnectionError,
    MigrationError,

    // Internal (5000s)
    #[serde(rename = "INTERNAL_SERVER_ERROR")]
    InternalError,
    UnknownError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidInput => "INVALID_INPUT",
            Self::MissingRequiredField => "MISSING_REQUIRED_DATA",
            Self::InvalidFormat => "INVALID_FORMAT",
            Self::NotFound => "NOT_FOUND",
            Self::ProductNotFound => "PRODUCT_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::BusinessRule => "BUSINESS_LOGIC_ERROR",
            Self::InsufficientStock => "INSUFFICIENT_STOCK",
            Self::DuplicateEntry => "DUPLICATE_ENTRY",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::ConnectionError => "CONNECTION_ERROR",
            Self::MigrationError => "MIGRATION_ERROR",
            Self::InternalError => "INTERNAL_SERVER_ERROR",
            Self::UnknownError => "UNKNOWN_ERROR",
        }
    }

    /// Integer code for structured logs and metrics.
    ///
    /// - 1000-1099: validation
    /// - 1100-1199: not found
    /// - 1200-1299: business rules
    /// - 1300-1399: access
    /// - 2000-2999: storage
    /// - 5000-5999: internal
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::InvalidInput => 1002,
            Self::MissingRequiredField => 1003,
            Self::InvalidFormat => 1004,

            Self::NotFound => 1101,
            Self::ProductNotFound => 1102,
            Self::UserNotFound => 1103,

            Self::BusinessRule => 1201,
            Self::InsufficientStock => 1202,
            Self::DuplicateEntry => 1203,

            Self::Unauthorized => 1301,
            Self::Forbidden => 1302,
            Self::TokenExpired => 1303,

            Self::DatabaseError => 2001,
            Self::ConnectionError => 2002,
            Self::MigrationError => 2003,

            Self::InternalError => 5001,
            Self::UnknownError => 5002,
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Validation failed",
            Self::InvalidInput => "Invalid input",
            Self::MissingRequiredField => "Missing required data",
            Self::InvalidFormat => "Invalid format",
            Self::NotFound => "Resource not found",
            Self::ProductNotFound => "Product not found",
            Self::UserNotFound => "User not found",
            Self::BusinessRule => "Business rule violated",
            Self::InsufficientStock => "Insufficient stock",
            Self::DuplicateEntry => "Duplicate entry",
            Self::Unauthorized => "Unauthorized access",
            Self::Forbidden => "Access forbidden",
            Self::TokenExpired => "Token has expired",
            Self::DatabaseError => "A database error occurred",
            Self::ConnectionError => "Database connection unavailable",
            Self::MigrationError => "Database migration failed",
            Self::InternalError => "An internal server error occurred",
            Self::UnknownError => "An unknown error occurred",
        }
    }

    /// Suggested HTTP status. Boundaries may override it per error with
    /// [`AppError::with_status`](super::AppError::with_status).
    pub fn status_hint(&self) -> StatusCode {
        match self {
            Self::ValidationError
            | Self::InvalidInput
            | Self::MissingRequiredField
            | Self::InvalidFormat => StatusCode::BAD_REQUEST,

            Self::NotFound | Self::ProductNotFound | Self::UserNotFound => StatusCode::NOT_FOUND,

            Self::BusinessRule => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InsufficientStock | Self::DuplicateEntry => StatusCode::CONFLICT,

            Self::Unauthorized | Self::TokenExpired => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,

            Self::ConnectionError => StatusCode::SERVICE_UNAVAILABLE,
            Self::DatabaseError
            | Self::MigrationError
            | Self::InternalError
            | Self::UnknownError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [ErrorCode; 18] = [
        ErrorCode::ValidationError,
        ErrorCode::InvalidInput,
        ErrorCode::MissingRequiredField,
        ErrorCode::InvalidFormat,
        ErrorCode::NotFound,
        ErrorCode::ProductNotFound,
        ErrorCode::UserNotFound,
        ErrorCode::BusinessRule,
        ErrorCode::InsufficientStock,
        ErrorCode::DuplicateEntry,
        ErrorCode::Unauthorized,
        ErrorCode::Forbidden,
        ErrorCode::TokenExpired,
        ErrorCode::DatabaseError,
        ErrorCode::ConnectionError,
        ErrorCode::MigrationError,
        ErrorCode::InternalError,
        ErrorCode::UnknownError,
    ];

    #[test]
    fn test_serde_matches_wire_string() {
        for code in ALL {
            let json = serde_json::to_string(&code).unwrap();
            assert_eq!(json, format!("\"{}\"", code.as_str()));

            let back: ErrorCode = serde_json::from_str(&json).unwrap();
            assert_eq!(back, code);
        }
    }

    #[test]
    fn test_integer_codes_are_unique() {
        let mut seen: Vec<i32> = ALL.iter().map(ErrorCode::code).collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), ALL.len());
    }

    #[test]
    fn test_status_hints() {
        assert_eq!(ErrorCode::MissingRequiredField.status_hint(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::ProductNotFound.status_hint(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::BusinessRule.status_hint(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(ErrorCode::InsufficientStock.status_hint(), StatusCode::CONFLICT);
        assert_eq!(ErrorCode::DuplicateEntry.status_hint(), StatusCode::CONFLICT);
        assert_eq!(ErrorCode::ConnectionError.status_hint(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(ErrorCode::MigrationError.status_hint(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ErrorCode::TokenExpired.status_hint(), StatusCode::UNAUTHORIZED);
        assert_eq!(ErrorCode::Forbidden.status_hint(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_display_uses_wire_string() {
        assert_eq!(ErrorCode::InternalError.to_string(), "INTERNAL_SERVER_ERROR");
    }
}
