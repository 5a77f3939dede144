use axum::Router;
use storage::Database;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod error;
pub mod extract;
pub mod features;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Workout API",
        description = "REST API for managing athletes, categories and training centers"
    ),
    paths(
        features::athletes::handlers::list_athletes,
        features::athletes::handlers::get_athlete,
        features::athletes::handlers::create_athlete,
        features::athletes::handlers::update_athlete,
        features::athletes::handlers::delete_athlete,
        features::categories::handlers::list_categories,
        features::categories::handlers::get_category,
        features::categories::handlers::create_category,
        features::categories::handlers::update_category,
        features::categories::handlers::delete_category,
        features::training_centers::handlers::list_training_centers,
        features::training_centers::handlers::get_training_center,
        features::training_centers::handlers::create_training_center,
        features::training_centers::handlers::update_training_center,
        features::training_centers::handlers::delete_training_center,
    ),
    components(
        schemas(
            storage::dto::athlete::CreateAthleteRequest,
            storage::dto::athlete::UpdateAthleteRequest,
            storage::dto::athlete::AthleteResponse,
            storage::dto::athlete::CategoryRef,
            storage::dto::athlete::TrainingCenterRef,
            storage::dto::category::CreateCategoryRequest,
            storage::dto::category::UpdateCategoryRequest,
            storage::dto::category::CategoryResponse,
            storage::dto::training_center::CreateTrainingCenterRequest,
            storage::dto::training_center::UpdateTrainingCenterRequest,
            storage::dto::training_center::TrainingCenterResponse,
        )
    ),
    tags(
        (name = "atletas", description = "Athlete endpoints"),
        (name = "categorias", description = "Category endpoints"),
        (name = "centros_treinamento", description = "Training center endpoints"),
    )
)]
pub struct ApiDoc;

/// Build the application router over the given database handle.
pub fn app(db: Database) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/atletas", features::athletes::routes())
        .nest("/categorias", features::categories::routes())
        .nest("/centros_treinamento", features::training_centers::routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .with_state(db)
}
