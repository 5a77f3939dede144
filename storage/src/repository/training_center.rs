use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::training_center::{CreateTrainingCenterRequest, UpdateTrainingCenterRequest};
use crate::error::{EntityKind, ReferenceKind, Result, StorageError};
use crate::models::TrainingCenter;
use crate::repository::integrity::ensure_no_dependents;

pub struct TrainingCenterRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TrainingCenterRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List one window of training centers together with the total count.
    pub async fn list(&self, limit: u32, offset: u32) -> Result<(Vec<TrainingCenter>, i64)> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM training_centers")
            .fetch_one(self.pool)
            .await?;

        let centers = sqlx::query_as::<_, TrainingCenter>(
            r#"
            SELECT pk_id, id, name, address, owner
            FROM training_centers
            ORDER BY name
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(i64::from(limit))
        .bind(i64::from(offset))
        .fetch_all(self.pool)
        .await?;

        Ok((centers, total))
    }

    /// Find a training center by its public id.
    pub async fn find_by_id(&self, id: Uuid) -> Result<TrainingCenter> {
        sqlx::query_as::<_, TrainingCenter>(
            "SELECT pk_id, id, name, address, owner FROM training_centers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound {
            kind: EntityKind::TrainingCenter,
            id,
        })
    }

    /// Create a training center. A name collision surfaces as `DuplicateKey`.
    pub async fn create(&self, req: &CreateTrainingCenterRequest) -> Result<TrainingCenter> {
        sqlx::query_as::<_, TrainingCenter>(
            r#"
            INSERT INTO training_centers (id, name, address, owner)
            VALUES ($1, $2, $3, $4)
            RETURNING pk_id, id, name, address, owner
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&req.name)
        .bind(&req.address)
        .bind(&req.owner)
        .fetch_one(self.pool)
        .await
        .map_err(|err| StorageError::classify_write(err, &req.name))
    }

    /// Apply a partial update. Absent fields keep their stored values.
    pub async fn update(
        &self,
        id: Uuid,
        req: &UpdateTrainingCenterRequest,
    ) -> Result<TrainingCenter> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, TrainingCenter>(
            "SELECT pk_id, id, name, address, owner FROM training_centers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(StorageError::NotFound {
            kind: EntityKind::TrainingCenter,
            id,
        })?;

        let name = req.name.as_ref().unwrap_or(&existing.name);
        let address = req.address.as_ref().unwrap_or(&existing.address);
        let owner = req.owner.as_ref().unwrap_or(&existing.owner);

        let center = sqlx::query_as::<_, TrainingCenter>(
            r#"
            UPDATE training_centers
            SET name = $2, address = $3, owner = $4
            WHERE pk_id = $1
            RETURNING pk_id, id, name, address, owner
            "#,
        )
        .bind(existing.pk_id)
        .bind(name)
        .bind(address)
        .bind(owner)
        .fetch_one(&mut *tx)
        .await
        .map_err(|err| StorageError::classify_write(err, name))?;

        tx.commit().await?;
        Ok(center)
    }

    /// Delete a training center, refusing while athletes are still assigned
    /// to it.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, TrainingCenter>(
            "SELECT pk_id, id, name, address, owner FROM training_centers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(StorageError::NotFound {
            kind: EntityKind::TrainingCenter,
            id,
        })?;

        ensure_no_dependents(
            &mut tx,
            ReferenceKind::TrainingCenter,
            existing.pk_id,
            &existing.name,
        )
        .await?;

        sqlx::query("DELETE FROM training_centers WHERE pk_id = $1")
            .bind(existing.pk_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}
