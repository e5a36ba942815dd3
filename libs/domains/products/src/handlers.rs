//! HTTP handlers for the products API

use axum::{
    Router,
    extract::{Path, Query, State},
    response::Response,
    routing::{get, post},
};
use axum_helpers::{
    ApiResponse, ErrorResponse, JsonBody,
    errors::responses::{
        BadRequestResponse, ConflictResponse, InternalServerErrorResponse, NotFoundResponse,
        ServiceUnavailableResponse,
    },
    response::{created, no_content},
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{
    Product, ProductInput, ProductListQuery, StockAdjustmentResponse, StockDecrement,
    StockIncrement,
};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// OpenAPI documentation for the products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        delete_product,
        increment_stock,
        decrement_stock,
    ),
    components(
        schemas(
            Product,
            ProductInput,
            StockIncrement,
            StockDecrement,
            StockAdjustmentResponse,
            ErrorResponse
        ),
        responses(
            BadRequestResponse,
            NotFoundResponse,
            ConflictResponse,
            InternalServerErrorResponse,
            ServiceUnavailableResponse
        )
    ),
    tags(
        (name = "Products", description = "Product and stock management endpoints")
    )
)]
pub struct ApiDoc;

/// Products router, to be nested under `/products`.
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/{id}/increment-stock", post(increment_stock))
        .route("/{id}/decrement-stock", post(decrement_stock))
        .with_state(shared_service)
}

/// List products, optionally only those at or below their low-stock threshold
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    params(ProductListQuery),
    responses(
        (status = 200, description = "List of products", body = ApiResponse<Vec<Product>>),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Query(query): Query<ProductListQuery>,
) -> ProductResult<ApiResponse<Vec<Product>>> {
    let mut products = service.get_all().await?;
    if query.low_stock_only() {
        products.retain(Product::is_low_stock);
    }
    Ok(ApiResponse::ok(products))
}

/// Create a product
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = ProductInput,
    responses(
        (status = 201, description = "Product created", body = ApiResponse<Product>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    JsonBody(input): JsonBody<ProductInput>,
) -> ProductResult<Response> {
    let product = service.create(input).await?;
    Ok(created(product))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = ApiResponse<Product>),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(id): Path<String>,
) -> ProductResult<ApiResponse<Product>> {
    let product = service.get_by_id(&id).await?;
    Ok(ApiResponse::ok(product))
}

/// Replace every mutable field of a product
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    request_body = ProductInput,
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<Product>),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<ProductInput>,
) -> ProductResult<ApiResponse<Product>> {
    let product = service.update(&id, input).await?;
    Ok(ApiResponse::ok(product))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(id): Path<String>,
) -> ProductResult<Response> {
    service.delete(&id).await?;
    Ok(no_content())
}

/// Add stock to a product
#[utoipa::path(
    post,
    path = "/{id}/increment-stock",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    request_body = StockIncrement,
    responses(
        (status = 200, description = "Stock incremented", body = ApiResponse<StockAdjustmentResponse>),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn increment_stock<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<StockIncrement>,
) -> ProductResult<ApiResponse<StockAdjustmentResponse>> {
    let product = service.increment_stock(&id, body.stock_increment).await?;
    Ok(ApiResponse::ok(StockAdjustmentResponse::incremented(
        product,
        body.stock_increment,
    )))
}

/// Remove stock from a product; rejected in full when stock is insufficient
#[utoipa::path(
    post,
    path = "/{id}/decrement-stock",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    request_body = StockDecrement,
    responses(
        (status = 200, description = "Stock decremented", body = ApiResponse<StockAdjustmentResponse>),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn decrement_stock<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<StockDecrement>,
) -> ProductResult<ApiResponse<StockAdjustmentResponse>> {
    let product = service.decrement_stock(&id, body.stock_decrement).await?;
    Ok(ApiResponse::ok(StockAdjustmentResponse::decremented(
        product,
        body.stock_decrement,
    )))
}
