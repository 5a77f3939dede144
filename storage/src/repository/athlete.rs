use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::dto::athlete::{CreateAthleteRequest, UpdateAthleteRequest};
use crate::error::{
    reference_violation, unique_violation, DuplicateKind, EntityKind, ReferenceKind, Result,
    StorageError,
};
use crate::models::Athlete;
use crate::repository::reference::resolve_reference;

pub struct AthleteRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AthleteRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List one window of athletes together with the total count.
    pub async fn list(&self, limit: u32, offset: u32) -> Result<(Vec<Athlete>, i64)> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM athletes")
            .fetch_one(self.pool)
            .await?;

        let athletes = sqlx::query_as::<_, Athlete>(
            r#"
            SELECT a.pk_id, a.id, a.cpf, a.name, a.age, a.weight, a.height, a.gender,
                   a.category_pk_id, c.name AS category_name,
                   a.training_center_pk_id, t.name AS training_center_name,
                   a.created_at
            FROM athletes a
            JOIN categories c ON c.pk_id = a.category_pk_id
            JOIN training_centers t ON t.pk_id = a.training_center_pk_id
            ORDER BY a.name, a.pk_id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(i64::from(limit))
        .bind(i64::from(offset))
        .fetch_all(self.pool)
        .await?;

        Ok((athletes, total))
    }

    /// Find an athlete by its public id.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Athlete> {
        sqlx::query_as::<_, Athlete>(
            r#"
            SELECT a.pk_id, a.id, a.cpf, a.name, a.age, a.weight, a.height, a.gender,
                   a.category_pk_id, c.name AS category_name,
                   a.training_center_pk_id, t.name AS training_center_name,
                   a.created_at
            FROM athletes a
            JOIN categories c ON c.pk_id = a.category_pk_id
            JOIN training_centers t ON t.pk_id = a.training_center_pk_id
            WHERE a.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound {
            kind: EntityKind::Athlete,
            id,
        })
    }

    /// Create an athlete, resolving its category and training center names
    /// inside the same transaction as the insert.
    pub async fn create(&self, req: &CreateAthleteRequest) -> Result<Athlete> {
        let mut tx = self.pool.begin().await?;

        let category_pk = resolve_reference(&mut tx, ReferenceKind::Category, &req.category.name)
            .await?
            .into_fk(ReferenceKind::Category)?;
        let training_center_pk = resolve_reference(
            &mut tx,
            ReferenceKind::TrainingCenter,
            &req.training_center.name,
        )
        .await?
        .into_fk(ReferenceKind::TrainingCenter)?;

        // Friendly pre-check; the unique index still decides under races.
        let taken =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM athletes WHERE cpf = $1)")
                .bind(&req.cpf)
                .fetch_one(&mut *tx)
                .await?;
        if taken {
            return Err(StorageError::DuplicateKey {
                kind: DuplicateKind::AthleteCpf,
                value: req.cpf.clone(),
            });
        }

        let pk_id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO athletes
                (id, cpf, name, age, weight, height, gender,
                 category_pk_id, training_center_pk_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING pk_id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&req.cpf)
        .bind(&req.name)
        .bind(req.age)
        .bind(req.weight)
        .bind(req.height)
        .bind(&req.gender)
        .bind(category_pk)
        .bind(training_center_pk)
        .fetch_one(&mut *tx)
        .await
        .map_err(|err| {
            classify_athlete_write(err, &req.cpf, &req.category.name, &req.training_center.name)
        })?;

        let athlete = find_by_pk(&mut tx, pk_id).await?;
        tx.commit().await?;
        Ok(athlete)
    }

    /// Apply a partial update. Only the references named in the request are
    /// re-resolved; everything absent keeps its stored value.
    pub async fn update(&self, id: Uuid, req: &UpdateAthleteRequest) -> Result<Athlete> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, Athlete>(
            r#"
            SELECT a.pk_id, a.id, a.cpf, a.name, a.age, a.weight, a.height, a.gender,
                   a.category_pk_id, c.name AS category_name,
                   a.training_center_pk_id, t.name AS training_center_name,
                   a.created_at
            FROM athletes a
            JOIN categories c ON c.pk_id = a.category_pk_id
            JOIN training_centers t ON t.pk_id = a.training_center_pk_id
            WHERE a.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(StorageError::NotFound {
            kind: EntityKind::Athlete,
            id,
        })?;

        let category_pk = match &req.category {
            Some(category) => resolve_reference(&mut tx, ReferenceKind::Category, &category.name)
                .await?
                .into_fk(ReferenceKind::Category)?,
            None => existing.category_pk_id,
        };
        let training_center_pk = match &req.training_center {
            Some(center) => resolve_reference(&mut tx, ReferenceKind::TrainingCenter, &center.name)
                .await?
                .into_fk(ReferenceKind::TrainingCenter)?,
            None => existing.training_center_pk_id,
        };

        let name = req.name.as_ref().unwrap_or(&existing.name);
        let age = req.age.unwrap_or(existing.age);
        let weight = req.weight.unwrap_or(existing.weight);
        let height = req.height.unwrap_or(existing.height);
        let gender = req.gender.as_ref().unwrap_or(&existing.gender);
        let category_name = req
            .category
            .as_ref()
            .map_or(existing.category_name.as_str(), |c| c.name.as_str());
        let training_center_name = req
            .training_center
            .as_ref()
            .map_or(existing.training_center_name.as_str(), |t| t.name.as_str());

        sqlx::query(
            r#"
            UPDATE athletes
            SET name = $2, age = $3, weight = $4, height = $5, gender = $6,
                category_pk_id = $7, training_center_pk_id = $8
            WHERE pk_id = $1
            "#,
        )
        .bind(existing.pk_id)
        .bind(name)
        .bind(age)
        .bind(weight)
        .bind(height)
        .bind(gender)
        .bind(category_pk)
        .bind(training_center_pk)
        .execute(&mut *tx)
        .await
        .map_err(|err| {
            classify_athlete_write(err, &existing.cpf, category_name, training_center_name)
        })?;

        let athlete = find_by_pk(&mut tx, existing.pk_id).await?;
        tx.commit().await?;
        Ok(athlete)
    }

    /// Delete an athlete by its public id.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM athletes WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound {
                kind: EntityKind::Athlete,
                id,
            });
        }
        Ok(())
    }
}

async fn find_by_pk(conn: &mut PgConnection, pk_id: i32) -> Result<Athlete> {
    Ok(sqlx::query_as::<_, Athlete>(
        r#"
        SELECT a.pk_id, a.id, a.cpf, a.name, a.age, a.weight, a.height, a.gender,
               a.category_pk_id, c.name AS category_name,
               a.training_center_pk_id, t.name AS training_center_name,
               a.created_at
        FROM athletes a
        JOIN categories c ON c.pk_id = a.category_pk_id
        JOIN training_centers t ON t.pk_id = a.training_center_pk_id
        WHERE a.pk_id = $1
        "#,
    )
    .bind(pk_id)
    .fetch_one(&mut *conn)
    .await?)
}

/// Attribute a rejected athlete write to the input that caused it. A unique
/// violation can only be the CPF; a foreign key violation means a referenced
/// row vanished between resolution and the write.
fn classify_athlete_write(
    err: sqlx::Error,
    cpf: &str,
    category_name: &str,
    training_center_name: &str,
) -> StorageError {
    if let Some(kind) = unique_violation(&err) {
        return StorageError::DuplicateKey {
            kind,
            value: cpf.to_owned(),
        };
    }
    if let Some(kind) = reference_violation(&err) {
        let name = match kind {
            ReferenceKind::Category => category_name.to_owned(),
            ReferenceKind::TrainingCenter => training_center_name.to_owned(),
        };
        return StorageError::ReferenceNotFound { kind, name };
    }
    StorageError::from(err)
}
