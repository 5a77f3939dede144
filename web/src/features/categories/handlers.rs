use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use storage::{
    dto::{
        category::{CategoryResponse, CreateCategoryRequest, UpdateCategoryRequest},
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
    path = "/categorias",
    params(LimitOffsetParams),
    responses(
        (status = 200, description = "One window of categories", body = Page<CategoryResponse>),
        (status = 400, description = "Invalid window parameters")
    ),
    tag = "categorias"
)]
pub async fn list_categories(
    State(db): State<Database>,
    Query(params): Query<LimitOffsetParams>,
) -> Result<Response, WebError> {
    params.validate().map_err(WebError::BadRequest)?;

    let (categories, total) = services::list_categories(db.pool(), &params).await?;

    let items: Vec<CategoryResponse> =
        categories.into_iter().map(CategoryResponse::from).collect();

    Ok(Json(Page::new(items, total, &params)).into_response())
}

#[utoipa::path(
    get,
    path = "/categorias/{id}",
    params(
        ("id" = Uuid, Path, description = "Category public id")
    ),
    responses(
        (status = 200, description = "Category found", body = CategoryResponse),
        (status = 404, description = "Category not found")
    ),
    tag = "categorias"
)]
pub async fn get_category(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let category = services::get_category(db.pool(), id).await?;

    Ok(Json(CategoryResponse::from(category)).into_response())
}

#[utoipa::path(
    post,
    path = "/categorias",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created successfully", body = CategoryResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Category name already registered")
    ),
    tag = "categorias"
)]
pub async fn create_category(
    State(db): State<Database>,
    ApiJson(req): ApiJson<CreateCategoryRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let category = services::create_category(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(CategoryResponse::from(category))).into_response())
}

#[utoipa::path(
    patch,
    path = "/categorias/{id}",
    params(
        ("id" = Uuid, Path, description = "Category public id")
    ),
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, description = "Category updated successfully", body = CategoryResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Category name already registered")
    ),
    tag = "categorias"
)]
pub async fn update_category(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    ApiJson(update_req): ApiJson<UpdateCategoryRequest>,
) -> Result<Response, WebError> {
    update_req.validate()?;

    let updated = services::update_category(db.pool(), id, &update_req).await?;

    Ok(Json(CategoryResponse::from(updated)).into_response())
}

#[utoipa::path(
    delete,
    path = "/categorias/{id}",
    params(
        ("id" = Uuid, Path, description = "Category public id")
    ),
    responses(
        (status = 204, description = "Category deleted successfully"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Athletes still assigned to the category")
    ),
    tag = "categorias"
)]
pub async fn delete_category(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_category(db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
