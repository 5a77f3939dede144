use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use storage::Database;

use super::handlers::{
    create_category, delete_category, get_category, list_categories, update_category,
};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/", get(list_categories))
        .route("/", post(create_category))
        .route("/:id", get(get_category))
        .route("/:id", patch(update_category))
        .route("/:id", delete(delete_category))
}
