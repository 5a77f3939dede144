use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Request payload for creating a new category
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryRequest {
    #[serde(rename = "nome")]
    #[validate(length(min = 1, max = 10, message = "Name must be between 1 and 10 characters"))]
    pub name: String,
}

/// Request payload for partially updating a category
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryRequest {
    #[serde(rename = "nome")]
    #[validate(length(min = 1, max = 10))]
    pub name: Option<String>,
}

/// Response containing a category addressed by its public id
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    pub id: Uuid,
    #[serde(rename = "nome")]
    pub name: String,
}

impl From<crate::models::Category> for CategoryResponse {
    fn from(category: crate::models::Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::models::Category;

    #[test]
    fn test_name_length_limit() {
        let req: CreateCategoryRequest = serde_json::from_value(json!({"nome": "Scale"})).unwrap();
        assert!(req.validate().is_ok());

        let req: CreateCategoryRequest =
            serde_json::from_value(json!({"nome": "12345678901"})).unwrap();
        assert!(req.validate().is_err());

        let req: CreateCategoryRequest = serde_json::from_value(json!({"nome": ""})).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_update_without_name_is_valid() {
        let req: UpdateCategoryRequest = serde_json::from_value(json!({})).unwrap();
        assert!(req.name.is_none());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_response_hides_surrogate_key() {
        let category = Category {
            pk_id: 42,
            id: Uuid::new_v4(),
            name: "Scale".to_owned(),
        };
        let body = serde_json::to_value(CategoryResponse::from(category)).unwrap();
        assert_eq!(body["nome"], "Scale");
        assert!(body.get("pk_id").is_none());
    }
}
