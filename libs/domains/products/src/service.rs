//! Product service: validation, existence checks and stock arithmetic.

use chrono::Utc;
use std::sync::Arc;
use tracing::{instrument, warn};
use validator::Validate;

use crate::error::{ProductError, ProductResult, RepositoryError};
use crate::models::{ColumnUpdate, Product, ProductInput};
use crate::repository::ProductRepository;

/// Guarded stock writes that lose a race are re-read and retried this many times.
const STOCK_WRITE_RETRIES: u32 = 1;

#[derive(Debug, Clone, Copy)]
enum StockChange {
    Increment(i32),
    Decrement(i32),
}

impl StockChange {
    fn amount(self) -> i32 {
        match self {
            StockChange::Increment(qty) | StockChange::Decrement(qty) => qty,
        }
    }

    /// New quantity, or the business error that forbids it.
    fn apply(self, current: i32) -> ProductResult<i32> {
        match self {
            StockChange::Increment(qty) => current.checked_add(qty).ok_or_else(|| {
                ProductError::InvalidInput(format!(
                    "stock increment of {} overflows current quantity {}",
                    qty, current
                ))
            }),
            StockChange::Decrement(qty) if current < qty => Err(ProductError::InsufficientStock {
                available: current,
                required: qty,
            }),
            StockChange::Decrement(qty) => Ok(current - qty),
        }
    }
}

/// Stateless; every call goes to the repository.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create(&self, input: ProductInput) -> ProductResult<Product> {
        validate_input(&input)?;

        let product = self.repository.create(input).await?;
        tracing::info!(product_id = %product.id, "Product created");
        Ok(product)
    }

    #[instrument(skip(self, id), fields(product_id = %id))]
    pub async fn get_by_id(&self, id: &str) -> ProductResult<Product> {
        require_id(id)?;
        self.fetch(id).await
    }

    #[instrument(skip(self))]
    pub async fn get_all(&self) -> ProductResult<Vec<Product>> {
        Ok(self.repository.get_all().await?)
    }

    /// Replace every mutable field of an existing product and return the stored record.
    #[instrument(skip(self, id, input), fields(product_id = %id))]
    pub async fn update(&self, id: &str, input: ProductInput) -> ProductResult<Product> {
        require_id(id)?;
        validate_input(&input)?;

        self.fetch(id).await?;

        self.repository
            .update_all_columns(id, &input)
            .await
            .map_err(|e| ProductError::from_repository(e, id))?;

        // Storage stamps updated_at, so return what it now holds
        self.fetch(id).await
    }

    #[instrument(skip(self, id), fields(product_id = %id))]
    pub async fn delete(&self, id: &str) -> ProductResult<()> {
        require_id(id)?;
        self.fetch(id).await?;

        self.repository
            .delete(id)
            .await
            .map_err(|e| ProductError::from_repository(e, id))?;

        tracing::info!("Product deleted");
        Ok(())
    }

    #[instrument(skip(self, id), fields(product_id = %id))]
    pub async fn increment_stock(&self, id: &str, quantity: i32) -> ProductResult<Product> {
        self.change_stock(id, StockChange::Increment(quantity)).await
    }

    /// Fails with `InsufficientStock` and leaves the row untouched when
    /// `quantity` exceeds the current stock.
    #[instrument(skip(self, id), fields(product_id = %id))]
    pub async fn decrement_stock(&self, id: &str, quantity: i32) -> ProductResult<Product> {
        self.change_stock(id, StockChange::Decrement(quantity)).await
    }

    async fn change_stock(&self, id: &str, change: StockChange) -> ProductResult<Product> {
        require_id(id)?;
        if change.amount() <= 0 {
            return Err(ProductError::InvalidInput(format!(
                "quantity must be greater than zero, got {}",
                change.amount()
            )));
        }

        let mut retries_left = STOCK_WRITE_RETRIES;
        loop {
            let mut product = self.fetch(id).await?;
            let current = product.stock_quantity;
            let target = change.apply(current)?;

            let update = ColumnUpdate::StockQuantity {
                value: target,
                expected: current,
            };

            match self.repository.update_single_column(id, update).await {
                Ok(()) => {
                    tracing::info!(from = current, to = target, "Stock updated");
                    product.stock_quantity = target;
                    product.updated_at = Utc::now();
                    return Ok(product);
                }
                Err(RepositoryError::Conflict) if retries_left > 0 => {
                    retries_left -= 1;
                    warn!(expected = current, "Stock changed concurrently, retrying");
                }
                Err(e) => return Err(ProductError::from_repository(e, id)),
            }
        }
    }

    async fn fetch(&self, id: &str) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await
            .map_err(|e| ProductError::from_repository(e, id))
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

fn require_id(id: &str) -> ProductResult<()> {
    if id.trim().is_empty() {
        return Err(ProductError::MissingRequiredField("id"));
    }
    Ok(())
}

/// Name, then stock sign, then column limits.
fn validate_input(input: &ProductInput) -> ProductResult<()> {
    if input.name.trim().is_empty() {
        return Err(ProductError::MissingRequiredField("name"));
    }
    if input.stock_quantity < 0 {
        return Err(ProductError::InvalidInput(format!(
            "stock_quantity must not be negative, got {}",
            input.stock_quantity
        )));
    }
    input.validate()?;
    Ok(())
}
