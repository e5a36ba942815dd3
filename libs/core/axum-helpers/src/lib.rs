//! # Axum Helpers
//!
//! Shared building blocks for the inventory HTTP service.
//!
//! - **[`errors`]**: the error taxonomy ([`ErrorCode`], [`AppError`]) and its JSON envelope
//! - **[`response`]**: the success envelope ([`ApiResponse`])
//! - **[`extractors`]**: [`JsonBody`], a JSON extractor rejecting with `INVALID_INPUT`
//! - **[`http`]**: CORS and security-header middleware
//! - **[`server`]**: router assembly, health/readiness, graceful shutdown

pub mod errors;
pub mod extractors;
pub mod http;
pub mod response;
pub mod server;

pub use errors::{AppError, ErrorCode, ErrorResponse};
pub use extractors::JsonBody;
pub use http::{create_cors_layer, create_permissive_cors_layer, security_headers};
pub use response::ApiResponse;
pub use server::{
    HealthCheckFuture, ShutdownCoordinator, create_production_app, create_router, health_router,
    run_health_checks, shutdown_signal,
};
