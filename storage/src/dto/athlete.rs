use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Category addressed by name, as it appears inside athlete payloads
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CategoryRef {
    #[serde(rename = "nome")]
    #[validate(length(
        min = 1,
        max = 10,
        message = "Category name must be between 1 and 10 characters"
    ))]
    pub name: String,
}

/// Training center addressed by name, as it appears inside athlete payloads
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct TrainingCenterRef {
    #[serde(rename = "nome")]
    #[validate(length(
        min = 1,
        max = 20,
        message = "Training center name must be between 1 and 20 characters"
    ))]
    pub name: String,
}

/// Request payload for creating a new athlete
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateAthleteRequest {
    #[validate(length(min = 11, max = 11, message = "CPF must be exactly 11 characters"))]
    pub cpf: String,

    #[serde(rename = "nome")]
    #[validate(length(min = 1, max = 50, message = "Name must be between 1 and 50 characters"))]
    pub name: String,

    #[serde(rename = "idade")]
    pub age: i16,

    #[serde(rename = "peso")]
    #[validate(range(exclusive_min = 0.0, message = "Weight must be positive"))]
    pub weight: f64,

    #[serde(rename = "altura")]
    #[validate(range(exclusive_min = 0.0, message = "Height must be positive"))]
    pub height: f64,

    #[serde(rename = "sexo")]
    #[validate(length(min = 1, max = 1, message = "Gender must be a single character"))]
    pub gender: String,

    #[serde(rename = "categoria")]
    #[validate(nested)]
    pub category: CategoryRef,

    #[serde(rename = "centro_treinamento")]
    #[validate(nested)]
    pub training_center: TrainingCenterRef,
}

/// Request payload for partially updating an athlete. Absent fields keep
/// their stored values; the CPF is immutable and cannot appear here at all.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateAthleteRequest {
    #[serde(rename = "nome")]
    #[validate(length(min = 1, max = 50))]
    pub name: Option<String>,

    #[serde(rename = "idade")]
    pub age: Option<i16>,

    #[serde(rename = "peso")]
    #[validate(range(exclusive_min = 0.0))]
    pub weight: Option<f64>,

    #[serde(rename = "altura")]
    #[validate(range(exclusive_min = 0.0))]
    pub height: Option<f64>,

    #[serde(rename = "sexo")]
    #[validate(length(min = 1, max = 1))]
    pub gender: Option<String>,

    #[serde(rename = "categoria")]
    #[validate(nested)]
    pub category: Option<CategoryRef>,

    #[serde(rename = "centro_treinamento")]
    #[validate(nested)]
    pub training_center: Option<TrainingCenterRef>,
}

/// Response containing an athlete with its resolved reference names
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AthleteResponse {
    pub id: Uuid,
    pub cpf: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "idade")]
    pub age: i16,
    #[serde(rename = "peso")]
    pub weight: f64,
    #[serde(rename = "altura")]
    pub height: f64,
    #[serde(rename = "sexo")]
    pub gender: String,
    #[serde(rename = "categoria")]
    pub category: CategoryRef,
    #[serde(rename = "centro_treinamento")]
    pub training_center: TrainingCenterRef,
    pub created_at: NaiveDateTime,
}

impl From<crate::models::Athlete> for AthleteResponse {
    fn from(athlete: crate::models::Athlete) -> Self {
        Self {
            id: athlete.id,
            cpf: athlete.cpf,
            name: athlete.name,
            age: athlete.age,
            weight: athlete.weight,
            height: athlete.height,
            gender: athlete.gender,
            category: CategoryRef {
                name: athlete.category_name,
            },
            training_center: TrainingCenterRef {
                name: athlete.training_center_name,
            },
            created_at: athlete.created_at,
        }
    }
}
