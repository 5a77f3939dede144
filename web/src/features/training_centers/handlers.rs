use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use storage::{
    dto::{
        common::{LimitOffsetParams, Page},
        training_center::{
            CreateTrainingCenterRequest, TrainingCenterResponse, UpdateTrainingCenterRequest,
        },
    },
    Database,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::extract::ApiJson;

use super::services;

#[utoipa::path(
    get,
    path = "/centros_treinamento",
    params(LimitOffsetParams),
    responses(
        (status = 200, description = "One window of training centers", body = Page<TrainingCenterResponse>),
        (status = 400, description = "Invalid window parameters")
    ),
    tag = "centros_treinamento"
)]
pub async fn list_training_centers(
    State(db): State<Database>,
    Query(params): Query<LimitOffsetParams>,
) -> Result<Response, WebError> {
    params.validate().map_err(WebError::BadRequest)?;

    let (centers, total) = services::list_training_centers(db.pool(), &params).await?;

    let items: Vec<TrainingCenterResponse> = centers
        .into_iter()
        .map(TrainingCenterResponse::from)
        .collect();

    Ok(Json(Page::new(items, total, &params)).into_response())
}

#[utoipa::path(
    get,
    path = "/centros_treinamento/{id}",
    params(
        ("id" = Uuid, Path, description = "Training center public id")
    ),
    responses(
        (status = 200, description = "Training center found", body = TrainingCenterResponse),
        (status = 404, description = "Training center not found")
    ),
    tag = "centros_treinamento"
)]
pub async fn get_training_center(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let center = services::get_training_center(db.pool(), id).await?;

    Ok(Json(TrainingCenterResponse::from(center)).into_response())
}

#[utoipa::path(
    post,
    path = "/centros_treinamento",
    request_body = CreateTrainingCenterRequest,
    responses(
        (status = 201, description = "Training center created successfully", body = TrainingCenterResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Training center name already registered")
    ),
    tag = "centros_treinamento"
)]
pub async fn create_training_center(
    State(db): State<Database>,
    ApiJson(req): ApiJson<CreateTrainingCenterRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let center = services::create_training_center(db.pool(), &req).await?;

    Ok((
        StatusCode::CREATED,
        Json(TrainingCenterResponse::from(center)),
    )
        .into_response())
}

#[utoipa::path(
    patch,
    path = "/centros_treinamento/{id}",
    params(
        ("id" = Uuid, Path, description = "Training center public id")
    ),
    request_body = UpdateTrainingCenterRequest,
    responses(
        (status = 200, description = "Training center updated successfully", body = TrainingCenterResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Training center not found"),
        (status = 409, description = "Training center name already registered")
    ),
    tag = "centros_treinamento"
)]
pub async fn update_training_center(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    ApiJson(update_req): ApiJson<UpdateTrainingCenterRequest>,
) -> Result<Response, WebError> {
    update_req.validate()?;

    let updated = services::update_training_center(db.pool(), id, &update_req).await?;

    Ok(Json(TrainingCenterResponse::from(updated)).into_response())
}

#[utoipa::path(
    delete,
    path = "/centros_treinamento/{id}",
    params(
        ("id" = Uuid, Path, description = "Training center public id")
    ),
    responses(
        (status = 204, description = "Training center deleted successfully"),
        (status = 404, description = "Training center not found"),
        (status = 409, description = "Athletes still assigned to the training center")
    ),
    tag = "centros_treinamento"
)]
pub async fn delete_training_center(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_training_center(db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
