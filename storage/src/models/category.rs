use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct Category {
    pub pk_id: i32,
    pub id: Uuid,
    pub name: String,
}
