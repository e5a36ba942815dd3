use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use validator::ValidationErrors;

/// Outcome of a storage call that did not succeed.
///
/// `NotFound` is an explicit variant so callers never compare against a
/// driver-specific "no rows" value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,

    /// A guarded write matched no row because the row changed after it was read.
    #[error("row was modified concurrently")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("database error: {0}")]
    Database(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Missing required field: {0}")]
    MissingRequiredField(&'static str),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Product with ID {0} not found")]
    NotFound(String),

    #[error("Insufficient stock: available {available}, required {required}")]
    InsufficientStock { available: i32, required: i32 },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl ProductError {
    /// Translate a storage failure for the product `id`.
    pub fn from_repository(err: RepositoryError, id: &str) -> Self {
        match err {
            RepositoryError::NotFound => ProductError::NotFound(id.to_string()),
            RepositoryError::Connection(msg) => ProductError::Connection(msg),
            RepositoryError::Conflict => ProductError::Database(format!(
                "product {} was modified concurrently, write aborted",
                id
            )),
            RepositoryError::Database(msg) => ProductError::Database(msg),
        }
    }
}

/// Failures with no product id in scope (create, list).
impl From<RepositoryError> for ProductError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Connection(msg) => ProductError::Connection(msg),
            RepositoryError::Database(msg) => ProductError::Database(msg),
            other @ (RepositoryError::NotFound | RepositoryError::Conflict) => {
                ProductError::Database(other.to_string())
            }
        }
    }
}

impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::MissingRequiredField(field) => AppError::missing_required_field(field),
            ProductError::InvalidInput(msg) => AppError::invalid_input(msg),
            ProductError::Validation(errors) => AppError::from(errors),
            ProductError::NotFound(id) => AppError::product_not_found(&id),
            ProductError::InsufficientStock {
                available,
                required,
            } => AppError::insufficient_stock(available.into(), required.into()),
            ProductError::Database(msg) => AppError::database(msg),
            ProductError::Connection(msg) => AppError::connection(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum_helpers::ErrorCode;

    #[test]
    fn test_repository_error_mapping() {
        assert!(matches!(
            ProductError::from_repository(RepositoryError::NotFound, "abc"),
            ProductError::NotFound(id) if id == "abc"
        ));
        assert!(matches!(
            ProductError::from_repository(RepositoryError::Connection("refused".into()), "abc"),
            ProductError::Connection(msg) if msg == "refused"
        ));
        assert!(matches!(
            ProductError::from_repository(RepositoryError::Conflict, "abc"),
            ProductError::Database(_)
        ));
        assert!(matches!(
            ProductError::from_repository(RepositoryError::Database("boom".into()), "abc"),
            ProductError::Database(msg) if msg == "boom"
        ));
    }

    #[test]
    fn test_insufficient_stock_carries_details() {
        let err: AppError = ProductError::InsufficientStock {
            available: 12,
            required: 100,
        }
        .into();

        assert_eq!(err.code(), ErrorCode::InsufficientStock);
        assert_eq!(err.status(), StatusCode::CONFLICT);
        assert_eq!(err.message(), "Insufficient stock. Available: 12, Required: 100");
        let details = err.details().unwrap();
        assert_eq!(details["available"], 12);
        assert_eq!(details["required"], 100);
    }

    #[test]
    fn test_codes_for_each_kind() {
        let cases: Vec<(ProductError, ErrorCode)> = vec![
            (
                ProductError::MissingRequiredField("name"),
                ErrorCode::MissingRequiredField,
            ),
            (
                ProductError::InvalidInput("bad".into()),
                ErrorCode::InvalidInput,
            ),
            (ProductError::NotFound("x".into()), ErrorCode::ProductNotFound),
            (ProductError::Database("x".into()), ErrorCode::DatabaseError),
            (
                ProductError::Connection("x".into()),
                ErrorCode::ConnectionError,
            ),
        ];

        for (err, code) in cases {
            assert_eq!(AppError::from(err).code(), code);
        }
    }
}
