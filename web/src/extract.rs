use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::Json;

use crate::error::WebError;

/// `Json` whose rejection goes through [`WebError`], so malformed or
/// incomplete bodies come back as the API's own 400 payload instead of
/// axum's plain-text rejection.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(WebError))]
pub struct ApiJson<T>(pub T);

impl From<JsonRejection> for WebError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}
