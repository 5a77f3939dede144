use sqlx::PgPool;
use storage::{
    dto::{
        category::{CreateCategoryRequest, UpdateCategoryRequest},
        common::LimitOffsetParams,
    },
    error::Result,
    models::Category,
    repository::category::CategoryRepository,
};
use uuid::Uuid;

/// List one window of categories with the total count
pub async fn list_categories(
    pool: &PgPool,
    params: &LimitOffsetParams,
) -> Result<(Vec<Category>, i64)> {
    let repo = CategoryRepository::new(pool);
    repo.list(params.limit, params.offset).await
}

/// Get category by public id
pub async fn get_category(pool: &PgPool, id: Uuid) -> Result<Category> {
    let repo = CategoryRepository::new(pool);
    repo.find_by_id(id).await
}

/// Create a new category
pub async fn create_category(pool: &PgPool, request: &CreateCategoryRequest) -> Result<Category> {
    let repo = CategoryRepository::new(pool);
    repo.create(request).await
}

/// Apply a partial update to a category
pub async fn update_category(
    pool: &PgPool,
    id: Uuid,
    request: &UpdateCategoryRequest,
) -> Result<Category> {
    let repo = CategoryRepository::new(pool);
    repo.update(id, request).await
}

/// Delete a category with no athletes assigned to it
pub async fn delete_category(pool: &PgPool, id: Uuid) -> Result<()> {
    let repo = CategoryRepository::new(pool);
    repo.delete(id).await
}
