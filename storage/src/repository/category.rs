use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::category::{CreateCategoryRequest, UpdateCategoryRequest};
use crate::error::{EntityKind, ReferenceKind, Result, StorageError};
use crate::models::Category;
use crate::repository::integrity::ensure_no_dependents;

pub struct CategoryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List one window of categories together with the total count.
    pub async fn list(&self, limit: u32, offset: u32) -> Result<(Vec<Category>, i64)> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM categories")
            .fetch_one(self.pool)
            .await?;

        let categories = sqlx::query_as::<_, Category>(
            "SELECT pk_id, id, name FROM categories ORDER BY name LIMIT $1 OFFSET $2",
        )
        .bind(i64::from(limit))
        .bind(i64::from(offset))
        .fetch_all(self.pool)
        .await?;

        Ok((categories, total))
    }

    /// Find a category by its public id.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Category> {
        sqlx::query_as::<_, Category>("SELECT pk_id, id, name FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound {
                kind: EntityKind::Category,
                id,
            })
    }

    /// Create a category. A name collision surfaces as `DuplicateKey`.
    pub async fn create(&self, req: &CreateCategoryRequest) -> Result<Category> {
        sqlx::query_as::<_, Category>(
            "INSERT INTO categories (id, name) VALUES ($1, $2) RETURNING pk_id, id, name",
        )
        .bind(Uuid::new_v4())
        .bind(&req.name)
        .fetch_one(self.pool)
        .await
        .map_err(|err| StorageError::classify_write(err, &req.name))
    }

    /// Apply a partial update. Absent fields keep their stored values.
    pub async fn update(&self, id: Uuid, req: &UpdateCategoryRequest) -> Result<Category> {
        let mut tx = self.pool.begin().await?;

        let existing =
            sqlx::query_as::<_, Category>("SELECT pk_id, id, name FROM categories WHERE id = $1")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or(StorageError::NotFound {
                    kind: EntityKind::Category,
                    id,
                })?;

        let name = req.name.as_ref().unwrap_or(&existing.name);

        let category = sqlx::query_as::<_, Category>(
            "UPDATE categories SET name = $2 WHERE pk_id = $1 RETURNING pk_id, id, name",
        )
        .bind(existing.pk_id)
        .bind(name)
        .fetch_one(&mut *tx)
        .await
        .map_err(|err| StorageError::classify_write(err, name))?;

        tx.commit().await?;
        Ok(category)
    }

    /// Delete a category, refusing while athletes are still assigned to it.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let existing =
            sqlx::query_as::<_, Category>("SELECT pk_id, id, name FROM categories WHERE id = $1")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or(StorageError::NotFound {
                    kind: EntityKind::Category,
                    id,
                })?;

        ensure_no_dependents(&mut tx, ReferenceKind::Category, existing.pk_id, &existing.name)
            .await?;

        sqlx::query("DELETE FROM categories WHERE pk_id = $1")
            .bind(existing.pk_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}
