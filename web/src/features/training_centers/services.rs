use sqlx::PgPool;
use storage::{
    dto::{
        common::LimitOffsetParams,
        training_center::{CreateTrainingCenterRequest, UpdateTrainingCenterRequest},
    },
    error::Result,
    models::TrainingCenter,
    repository::training_center::TrainingCenterRepository,
};
use uuid::Uuid;

/// List one window of training centers with the total count
pub async fn list_training_centers(
    pool: &PgPool,
    params: &LimitOffsetParams,
) -> Result<(Vec<TrainingCenter>, i64)> {
    let repo = TrainingCenterRepository::new(pool);
    repo.list(params.limit, params.offset).await
}

/// Get training center by public id
pub async fn get_training_center(pool: &PgPool, id: Uuid) -> Result<TrainingCenter> {
    let repo = TrainingCenterRepository::new(pool);
    repo.find_by_id(id).await
}

/// Create a new training center
pub async fn create_training_center(
    pool: &PgPool,
    request: &CreateTrainingCenterRequest,
) -> Result<TrainingCenter> {
    let repo = TrainingCenterRepository::new(pool);
    repo.create(request).await
}

/// Apply a partial update to a training center
pub async fn update_training_center(
    pool: &PgPool,
    id: Uuid,
    request: &UpdateTrainingCenterRequest,
) -> Result<TrainingCenter> {
    let repo = TrainingCenterRepository::new(pool);
    repo.update(id, request).await
}

/// Delete a training center with no athletes assigned to it
pub async fn delete_training_center(pool: &PgPool, id: Uuid) -> Result<()> {
    let repo = TrainingCenterRepository::new(pool);
    repo.delete(id).await
}
