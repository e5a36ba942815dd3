//! Products Domain
//!
//! Products with a non-negative stock quantity, adjusted through guarded
//! increment/decrement operations.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, existence checks, stock arithmetic
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Storage port (PostgreSQL, in-memory)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Product, ProductInput, ColumnUpdate
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_products::{handlers, PgProductRepository, ProductService};
//!
//! let service = ProductService::new(PgProductRepository::new(db));
//! let router = axum::Router::new().nest("/products", handlers::router(service));
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{ProductError, ProductResult, RepositoryError, RepositoryResult};
pub use handlers::ApiDoc;
pub use models::{
    ColumnUpdate, Product, ProductInput, ProductListQuery, StockAdjustmentResponse,
    StockDecrement, StockIncrement,
};
pub use postgres::PgProductRepository;
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::ProductService;
