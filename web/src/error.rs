use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use storage::error::StorageError;
use validator::ValidationErrors;

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    Storage(StorageError),
    Validation(ValidationErrors),
    BadRequest(String),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "Storage error: {}", e),
            Self::Validation(e) => write!(f, "Validation error: {}", e),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status_code = match &self {
            Self::Storage(StorageError::NotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Storage(StorageError::ReferenceNotFound { .. }) => StatusCode::BAD_REQUEST,
            Self::Storage(StorageError::DuplicateKey { .. }) => StatusCode::CONFLICT,
            Self::Storage(StorageError::DependencyConflict { .. }) => StatusCode::CONFLICT,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        // The kind tag keeps the two 409 causes apart for clients.
        let body = match &self {
            Self::Storage(e @ StorageError::NotFound { .. }) => {
                json!({
                    "kind": "not_found",
                    "error": e.to_string()
                })
            }
            Self::Storage(e @ StorageError::ReferenceNotFound { .. }) => {
                json!({
                    "kind": "reference_not_found",
                    "error": e.to_string()
                })
            }
            Self::Storage(e @ StorageError::DuplicateKey { .. }) => {
                json!({
                    "kind": "duplicate_key",
                    "error": e.to_string()
                })
            }
            Self::Storage(e @ StorageError::DependencyConflict { dependents, .. }) => {
                json!({
                    "kind": "dependency_conflict",
                    "error": e.to_string(),
                    "dependents": dependents
                })
            }
            Self::Storage(e) => {
                tracing::error!("Storage error: {:?}", e);
                json!({
                    "kind": "internal",
                    "error": "An internal error occurred"
                })
            }
            Self::Validation(errors) => {
                let field_errors: Vec<String> = errors
                    .field_errors()
                    .iter()
                    .flat_map(|(field, errors)| {
                        errors.iter().map(move |e| {
                            format!(
                                "{}: {}",
                                field,
                                e.message
                                    .as_ref()
                                    .map(|m| m.to_string())
                                    .unwrap_or_else(|| e.code.to_string())
                            )
                        })
                    })
                    .collect();

                json!({
                    "kind": "validation",
                    "error": "Validation failed",
                    "details": field_errors
                })
            }
            Self::BadRequest(msg) => {
                json!({
                    "kind": "bad_request",
                    "error": msg
                })
            }
        };

        (status_code, Json(body)).into_response()
    }
}

impl From<StorageError> for WebError {
    fn from(error: StorageError) -> Self {
        Self::Storage(error)
    }
}

impl From<ValidationErrors> for WebError {
    fn from(error: ValidationErrors) -> Self {
        Self::Validation(error)
    }
}
