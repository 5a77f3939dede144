use sqlx::PgPool;
use storage::{
    dto::{
        athlete::{CreateAthleteRequest, UpdateAthleteRequest},
        common::LimitOffsetParams,
    },
    error::Result,
    models::Athlete,
    repository::athlete::AthleteRepository,
};
use uuid::Uuid;

/// List one window of athletes with the total count
pub async fn list_athletes(
    pool: &PgPool,
    params: &LimitOffsetParams,
) -> Result<(Vec<Athlete>, i64)> {
    let repo = AthleteRepository::new(pool);
    repo.list(params.limit, params.offset).await
}

/// Get athlete by public id
pub async fn get_athlete(pool: &PgPool, id: Uuid) -> Result<Athlete> {
    let repo = AthleteRepository::new(pool);
    repo.find_by_id(id).await
}

/// Create a new athlete
pub async fn create_athlete(pool: &PgPool, request: &CreateAthleteRequest) -> Result<Athlete> {
    let repo = AthleteRepository::new(pool);
    repo.create(request).await
}

/// Apply a partial update to an athlete
pub async fn update_athlete(
    pool: &PgPool,
    id: Uuid,
    request: &UpdateAthleteRequest,
) -> Result<Athlete> {
    let repo = AthleteRepository::new(pool);
    repo.update(id, request).await
}

/// Delete an athlete
pub async fn delete_athlete(pool: &PgPool, id: Uuid) -> Result<()> {
    let repo = AthleteRepository::new(pool);
    repo.delete(id).await
}
