use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// A stocked product as stored by a [`ProductRepository`](crate::ProductRepository).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Opaque identifier assigned by storage
    #[schema(example = "0190f0e6-5c1a-7d2e-9b41-3f6a2c8d9e10")]
    pub id: String,
    #[schema(example = "Widget")]
    pub name: String,
    pub description: Option<String>,
    /// Never negative
    #[schema(example = 12, minimum = 0)]
    pub stock_quantity: i32,
    #[schema(example = 5)]
    pub low_stock_threshold: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// `stock_quantity <= low_stock_threshold`. Reported, never enforced.
    pub fn is_low_stock(&self) -> bool {
        self.stock_quantity <= self.low_stock_threshold
    }

    /// Overwrite every mutable field with `input`.
    pub fn apply_input(&mut self, input: ProductInput) {
        self.name = input.name;
        self.description = input.description;
        self.stock_quantity = input.stock_quantity;
        self.low_stock_threshold = input.low_stock_threshold;
        self.updated_at = Utc::now();
    }
}

/// Body for create and full-replace update.
///
/// Required-ness and sign of `stock_quantity` are checked by the service so
/// they surface as `MISSING_REQUIRED_DATA` / `INVALID_INPUT`; the derive only
/// carries column limits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct ProductInput {
    #[validate(length(max = 255))]
    #[schema(example = "Widget", max_length = 255)]
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    #[schema(example = 10)]
    pub stock_quantity: i32,
    #[serde(default)]
    #[schema(example = 5)]
    pub low_stock_threshold: i32,
}

/// A single-column write. Carries the value the caller read so storage can
/// refuse the write if the row moved underneath it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnUpdate {
    StockQuantity { value: i32, expected: i32 },
}

impl ColumnUpdate {
    pub fn column_name(&self) -> &'static str {
        match self {
            ColumnUpdate::StockQuantity { .. } => "stock_quantity",
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct StockIncrement {
    #[schema(example = 5)]
    pub stock_increment: i32,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct StockDecrement {
    #[schema(example = 3)]
    pub stock_decrement: i32,
}

/// Response of the increment/decrement endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StockAdjustmentResponse {
    #[schema(example = "Stock incremented successfully")]
    pub message: String,
    pub product: Product,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub increment_amount: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decrement_amount: Option<i32>,
}

impl StockAdjustmentResponse {
    pub fn incremented(product: Product, amount: i32) -> Self {
        Self {
            message: "Stock incremented successfully".to_string(),
            product,
            increment_amount: Some(amount),
            decrement_amount: None,
        }
    }

    pub fn decremented(product: Product, amount: i32) -> Self {
        Self {
            message: "Stock decremented successfully".to_string(),
            product,
            increment_amount: None,
            decrement_amount: Some(amount),
        }
    }
}

/// Query string of `GET /products`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductListQuery {
    /// Only `true` enables the filter; any other value is ignored
    #[serde(rename = "low-stock")]
    #[param(example = "true")]
    pub low_stock: Option<String>,
}

impl ProductListQuery {
    pub fn low_stock_only(&self) -> bool {
        self.low_stock.as_deref() == Some("true")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(stock: i32, threshold: i32) -> Product {
        let now = Utc::now();
        Product {
            id: "p1".to_string(),
            name: "Widget".to_string(),
            description: None,
            stock_quantity: stock,
            low_stock_threshold: threshold,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_low_stock_is_inclusive() {
        assert!(product(5, 5).is_low_stock());
        assert!(product(0, 0).is_low_stock());
        assert!(!product(6, 5).is_low_stock());
    }

    #[test]
    fn test_apply_input_replaces_all_fields() {
        let mut p = product(10, 2);
        let created_at = p.created_at;

        p.apply_input(ProductInput {
            name: "Gadget".to_string(),
            description: Some("new".to_string()),
            stock_quantity: 3,
            low_stock_threshold: 4,
        });

        assert_eq!(p.name, "Gadget");
        assert_eq!(p.description.as_deref(), Some("new"));
        assert_eq!(p.stock_quantity, 3);
        assert_eq!(p.low_stock_threshold, 4);
        assert_eq!(p.created_at, created_at);
        assert!(p.updated_at >= created_at);
    }

    #[test]
    fn test_input_missing_fields_default() {
        let input: ProductInput = serde_json::from_str(r#"{"name":"Widget"}"#).unwrap();
        assert_eq!(input.stock_quantity, 0);
        assert_eq!(input.low_stock_threshold, 0);
        assert!(input.description.is_none());
    }

    #[test]
    fn test_input_name_length_limit() {
        let input = ProductInput {
            name: "x".repeat(256),
            ..Default::default()
        };
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn test_low_stock_query_only_accepts_true() {
        let q = |v: Option<&str>| ProductListQuery {
            low_stock: v.map(str::to_string),
        };
        assert!(q(Some("true")).low_stock_only());
        assert!(!q(Some("TRUE")).low_stock_only());
        assert!(!q(Some("1")).low_stock_only());
        assert!(!q(None).low_stock_only());
    }

    #[test]
    fn test_adjustment_response_shape() {
        let json = serde_json::to_value(StockAdjustmentResponse::decremented(product(7, 1), 3))
            .unwrap();
        assert_eq!(json["message"], "Stock decremented successfully");
        assert_eq!(json["decrement_amount"], 3);
        assert!(json.get("increment_amount").is_none());
        assert_eq!(json["product"]["stock_quantity"], 7);
    }
}
