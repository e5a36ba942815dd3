//! Database migration endpoint

use axum::{Router, extract::State, routing::get};
use axum_helpers::{
    ApiResponse, AppError,
    errors::responses::{InternalServerErrorResponse, ServiceUnavailableResponse},
};
use database::{DatabaseError, postgres::run_migrations};
use migration::Migrator;

use crate::state::AppState;

pub const MIGRATED_MESSAGE: &str = "Database migrated successfully";

/// Apply pending database migrations
#[utoipa::path(
    get,
    path = "/api/v1/migrate",
    tag = "Maintenance",
    responses(
        (status = 200, description = "Database migrated successfully"),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
pub async fn migrate(State(state): State<AppState>) -> Result<ApiResponse<()>, AppError> {
    run_migrations::<Migrator>(&state.db, state.config.app.name)
        .await
        .map_err(migration_error)?;

    Ok(ApiResponse::with_message(MIGRATED_MESSAGE, ()))
}

fn migration_error(err: DatabaseError) -> AppError {
    match err {
        DatabaseError::ConnectionFailed(cause) => AppError::connection(cause),
        DatabaseError::MigrationError(cause) | DatabaseError::HealthCheckFailed(cause) => {
            AppError::migration(format!("failed to migrate database: {}", cause))
        }
    }
}

/// Router exposing `GET /migrate`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/migrate", get(migrate))
        .with_state(state)
}
