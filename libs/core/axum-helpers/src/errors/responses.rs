//! Reusable OpenAPI error responses, referenced from `#[utoipa::path]` attributes.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Bad Request - invalid or missing input",
    content_type = "application/json",
    example = json!({
        "success": false,
        "message": "Missing required field: name",
        "code": "MISSING_REQUIRED_DATA",
        "details": { "field": "name" }
    })
)]
pub struct BadRequestResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "success": false,
        "message": "Product with ID 0190f0e6-5c1a-7d2e-9b41-3f6a2c8d9e10 not found",
        "code": "PRODUCT_NOT_FOUND",
        "details": { "id": "0190f0e6-5c1a-7d2e-9b41-3f6a2c8d9e10" }
    })
)]
pub struct NotFoundResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Conflict - not enough stock for the requested decrement",
    content_type = "application/json",
    example = json!({
        "success": false,
        "message": "Insufficient stock. Available: 12, Required: 100",
        "code": "INSUFFICIENT_STOCK",
        "details": { "available": 12, "required": 100 }
    })
)]
pub struct ConflictResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "success": false,
        "message": "A database error occurred",
        "code": "DATABASE_ERROR"
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Service Unavailable - database unreachable",
    content_type = "application/json",
    example = json!({
        "success": false,
        "message": "Database connection unavailable",
        "code": "CONNECTION_ERROR"
    })
)]
pub struct ServiceUnavailableResponse(pub ErrorResponse);
