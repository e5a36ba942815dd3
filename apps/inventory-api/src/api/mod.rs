//! API routes module

pub mod health;
pub mod migrate;
pub mod products;

use axum::Router;
use axum_helpers::{create_router, health_router};
use tower_http::cors::CorsLayer;

use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Versioned API routes, nested under `/api` by [`app`].
pub fn routes(state: &AppState) -> Router {
    let v1 = Router::new()
        .nest("/products", products::router(state))
        .merge(migrate::router(state.clone()));

    Router::new().nest("/v1", v1)
}

/// The complete application: documented API plus `/health` and `/ready`.
pub fn app(state: &AppState, cors: CorsLayer) -> Router {
    create_router::<ApiDoc>(routes(state), cors)
        .merge(health_router(state.config.app))
        .merge(health::router(state.clone()))
}
