use async_trait::async_trait;
use database::postgres::is_connection_error;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::{
    entity,
    error::{RepositoryError, RepositoryResult},
    models::{ColumnUpdate, Product, ProductInput},
    repository::ProductRepository,
};

/// PostgreSQL adapter. Deletes are soft: they stamp `deleted_at`.
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_live(&self, id: Uuid) -> RepositoryResult<entity::Model> {
        entity::Entity::find_by_id(id)
            .filter(entity::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(storage_error)?
            .ok_or(RepositoryError::NotFound)
    }
}

/// Ids that are not UUIDs cannot name a row.
fn parse_id(id: &str) -> RepositoryResult<Uuid> {
    Uuid::parse_str(id).map_err(|_| RepositoryError::NotFound)
}

fn storage_error(err: DbErr) -> RepositoryError {
    if is_connection_error(&err) {
        RepositoryError::Connection(err.to_string())
    } else {
        RepositoryError::Database(err.to_string())
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, input: ProductInput) -> RepositoryResult<Product> {
        let active_model: entity::ActiveModel = input.into();

        let model = active_model.insert(&self.db).await.map_err(storage_error)?;

        tracing::info!(product_id = %model.id, "Created product");
        Ok(model.into())
    }

    async fn get_all(&self) -> RepositoryResult<Vec<Product>> {
        let models = entity::Entity::find()
            .filter(entity::Column::DeletedAt.is_null())
            .order_by_asc(entity::Column::CreatedAt)
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await
            .map_err(storage_error)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn get_by_id(&self, id: &str) -> RepositoryResult<Product> {
        let id = parse_id(id)?;
        Ok(self.find_live(id).await?.into())
    }

    async fn update_all_columns(&self, id: &str, input: &ProductInput) -> RepositoryResult<()> {
        let id = parse_id(id)?;

        let result = entity::Entity::update_many()
            .col_expr(entity::Column::Name, Expr::value(input.name.clone()))
            .col_expr(
                entity::Column::Description,
                Expr::value(input.description.clone()),
            )
            .col_expr(
                entity::Column::StockQuantity,
                Expr::value(input.stock_quantity),
            )
            .col_expr(
                entity::Column::LowStockThreshold,
                Expr::value(input.low_stock_threshold),
            )
            .col_expr(entity::Column::UpdatedAt, Expr::current_timestamp())
            .filter(entity::Column::Id.eq(id))
            .filter(entity::Column::DeletedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(storage_error)?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }

        tracing::info!(product_id = %id, "Updated product");
        Ok(())
    }

    async fn update_single_column(&self, id: &str, update: ColumnUpdate) -> RepositoryResult<()> {
        let id = parse_id(id)?;

        let query = match update {
            ColumnUpdate::StockQuantity { value, expected } => entity::Entity::update_many()
                .col_expr(entity::Column::StockQuantity, Expr::value(value))
                .filter(entity::Column::StockQuantity.eq(expected)),
        };

        let result = query
            .col_expr(entity::Column::UpdatedAt, Expr::current_timestamp())
            .filter(entity::Column::Id.eq(id))
            .filter(entity::Column::DeletedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(storage_error)?;

        if result.rows_affected == 0 {
            // Either the row is gone or the guard no longer holds.
            self.find_live(id).await?;
            return Err(RepositoryError::Conflict);
        }

        tracing::debug!(product_id = %id, column = update.column_name(), "Updated column");
        Ok(())
    }

    async fn delete(&self, id: &str) -> RepositoryResult<()> {
        let id = parse_id(id)?;

        let result = entity::Entity::update_many()
            .col_expr(entity::Column::DeletedAt, Expr::current_timestamp())
            .filter(entity::Column::Id.eq(id))
            .filter(entity::Column::DeletedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(storage_error)?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }

        tracing::info!(product_id = %id, "Deleted product");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, RuntimeErr};

    fn model(id: Uuid, stock: i32) -> entity::Model {
        let now = chrono::Utc::now().into();
        entity::Model {
            id,
            name: "Widget".to_string(),
            description: None,
            stock_quantity: stock,
            low_stock_threshold: 1,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    #[tokio::test]
    async fn test_non_uuid_id_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let repo = PgProductRepository::new(db);

        assert_eq!(
            repo.get_by_id("not-a-uuid").await.unwrap_err(),
            RepositoryError::NotFound
        );
    }

    #[tokio::test]
    async fn test_get_by_id_maps_model() {
        let id = Uuid::now_v7();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(id, 4)]])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let product = repo.get_by_id(&id.to_string()).await.unwrap();
        assert_eq!(product.id, id.to_string());
        assert_eq!(product.stock_quantity, 4);
    }

    #[tokio::test]
    async fn test_guarded_write_on_live_row_is_conflict() {
        let id = Uuid::now_v7();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .append_query_results([vec![model(id, 9)]])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let result = repo
            .update_single_column(
                &id.to_string(),
                ColumnUpdate::StockQuantity {
                    value: 5,
                    expected: 10,
                },
            )
            .await;
        assert_eq!(result.unwrap_err(), RepositoryError::Conflict);
    }

    #[tokio::test]
    async fn test_guarded_write_on_missing_row_is_not_found() {
        let id = Uuid::now_v7();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let result = repo
            .update_single_column(
                &id.to_string(),
                ColumnUpdate::StockQuantity {
                    value: 5,
                    expected: 10,
                },
            )
            .await;
        assert_eq!(result.unwrap_err(), RepositoryError::NotFound);
    }

    #[tokio::test]
    async fn test_delete_of_absent_row_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();
        let repo = PgProductRepository::new(db);

        assert_eq!(
            repo.delete(&Uuid::now_v7().to_string()).await.unwrap_err(),
            RepositoryError::NotFound
        );
    }

    #[tokio::test]
    async fn test_connection_failure_is_tagged() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Conn(RuntimeErr::Internal("refused".into()))])
            .into_connection();
        let repo = PgProductRepository::new(db);

        assert!(matches!(
            repo.get_all().await,
            Err(RepositoryError::Connection(_))
        ));
    }
}
