use chrono::NaiveDateTime;
use sqlx::FromRow;
use uuid::Uuid;

/// An athlete row joined with the names of its category and training center.
/// Every athlete SELECT goes through the same join, so responses can embed
/// both names without extra round trips. `pk_id` is the surrogate key and
/// never leaves the storage layer; `id` is the public identifier.
#[derive(Debug, Clone, FromRow)]
pub struct Athlete {
    pub pk_id: i32,
    pub id: Uuid,
    pub cpf: String,
    pub name: String,
    pub age: i16,
    pub weight: f64,
    pub height: f64,
    pub gender: String,
    pub category_pk_id: i32,
    pub category_name: String,
    pub training_center_pk_id: i32,
    pub training_center_name: String,
    pub created_at: NaiveDateTime,
}
