use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use storage::{
    dto::{
        athlete::{AthleteResponse, CreateAthleteRequest, UpdateAthleteRequest},
        common::{LimitOffsetParams, Page},
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
    path = "/atletas",
    params(LimitOffsetParams),
    responses(
        (status = 200, description = "One window of athletes", body = Page<AthleteResponse>),
        (status = 400, description = "Invalid window parameters")
    ),
    tag = "atletas"
)]
pub async fn list_athletes(
    State(db): State<Database>,
    Query(params): Query<LimitOffsetParams>,
) -> Result<Response, WebError> {
    params.validate().map_err(WebError::BadRequest)?;

    let (athletes, total) = services::list_athletes(db.pool(), &params).await?;

    let items: Vec<AthleteResponse> = athletes.into_iter().map(AthleteResponse::from).collect();

    Ok(Json(Page::new(items, total, &params)).into_response())
}

#[utoipa::path(
    get,
    path = "/atletas/{id}",
    params(
        ("id" = Uuid, Path, description = "Athlete public id")
    ),
    responses(
        (status = 200, description = "Athlete found", body = AthleteResponse),
        (status = 404, description = "Athlete not found")
    ),
    tag = "atletas"
)]
pub async fn get_athlete(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let athlete = services::get_athlete(db.pool(), id).await?;

    Ok(Json(AthleteResponse::from(athlete)).into_response())
}

#[utoipa::path(
    post,
    path = "/atletas",
    request_body = CreateAthleteRequest,
    responses(
        (status = 201, description = "Athlete created successfully", body = AthleteResponse),
        (status = 400, description = "Validation error or referenced name not found"),
        (status = 409, description = "CPF already registered")
    ),
    tag = "atletas"
)]
pub async fn create_athlete(
    State(db): State<Database>,
    ApiJson(req): ApiJson<CreateAthleteRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let athlete = services::create_athlete(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(AthleteResponse::from(athlete))).into_response())
}

#[utoipa::path(
    patch,
    path = "/atletas/{id}",
    params(
        ("id" = Uuid, Path, description = "Athlete public id")
    ),
    request_body = UpdateAthleteRequest,
    responses(
        (status = 200, description = "Athlete updated successfully", body = AthleteResponse),
        (status = 400, description = "Validation error or referenced name not found"),
        (status = 404, description = "Athlete not found")
    ),
    tag = "atletas"
)]
pub async fn update_athlete(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    ApiJson(update_req): ApiJson<UpdateAthleteRequest>,
) -> Result<Response, WebError> {
    update_req.validate()?;

    let updated = services::update_athlete(db.pool(), id, &update_req).await?;

    Ok(Json(AthleteResponse::from(updated)).into_response())
}

#[utoipa::path(
    delete,
    path = "/atletas/{id}",
    params(
        ("id" = Uuid, Path, description = "Athlete public id")
    ),
    responses(
        (status = 204, description = "Athlete deleted successfully"),
        (status = 404, description = "Athlete not found")
    ),
    tag = "atletas"
)]
pub async fn delete_athlete(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_athlete(db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
