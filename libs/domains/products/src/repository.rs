use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{RepositoryError, RepositoryResult};
use crate::models::{ColumnUpdate, Product, ProductInput};

/// Storage port for products.
///
/// Absent rows are reported as `Err(RepositoryError::NotFound)`; soft-deleted
/// rows count as absent.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Persist a new product; storage assigns the id and timestamps.
    async fn create(&self, input: ProductInput) -> RepositoryResult<Product>;

    async fn get_all(&self) -> RepositoryResult<Vec<Product>>;

    async fn get_by_id(&self, id: &str) -> RepositoryResult<Product>;

    /// Replace every mutable column.
    async fn update_all_columns(&self, id: &str, input: &ProductInput) -> RepositoryResult<()>;

    /// Write one column. Returns `Conflict` if the row no longer holds the
    /// expected value.
    async fn update_single_column(&self, id: &str, update: ColumnUpdate) -> RepositoryResult<()>;

    async fn delete(&self, id: &str) -> RepositoryResult<()>;
}

/// In-memory implementation for tests and local runs
#[derive(Clone, Default)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<String, Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, input: ProductInput) -> RepositoryResult<Product> {
        let now = Utc::now();
        let product = Product {
            id: Uuid::now_v7().to_string(),
            name: input.name,
            description: input.description,
            stock_quantity: input.stock_quantity,
            low_stock_threshold: input.low_stock_threshold,
            created_at: now,
            updated_at: now,
        };

        self.products
            .write()
            .await
            .insert(product.id.clone(), product.clone());

        tracing::info!(product_id = %product.id, "Created product");
        Ok(product)
    }

    async fn get_all(&self) -> RepositoryResult<Vec<Product>> {
        let products = self.products.read().await;
        let mut all: Vec<Product> = products.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(all)
    }

    async fn get_by_id(&self, id: &str) -> RepositoryResult<Product> {
        self.products
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn update_all_columns(&self, id: &str, input: &ProductInput) -> RepositoryResult<()> {
        let mut products = self.products.write().await;
        let product = products.get_mut(id).ok_or(RepositoryError::NotFound)?;
        product.apply_input(input.clone());
        Ok(())
    }

    async fn update_single_column(&self, id: &str, update: ColumnUpdate) -> RepositoryResult<()> {
        let mut products = self.products.write().await;
        let product = products.get_mut(id).ok_or(RepositoryError::NotFound)?;

        match update {
            ColumnUpdate::StockQuantity { value, expected } => {
                if product.stock_quantity != expected {
                    return Err(RepositoryError::Conflict);
                }
                if value < 0 {
                    return Err(RepositoryError::Database(
                        "stock_quantity violates check constraint".to_string(),
                    ));
                }
                product.stock_quantity = value;
            }
        }
        product.updated_at = Utc::now();
        Ok(())
    }

    async fn delete(&self, id: &str) -> RepositoryResult<()> {
        match self.products.write().await.remove(id) {
            Some(_) => {
                tracing::info!(product_id = %id, "Deleted product");
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }
}
