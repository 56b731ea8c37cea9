use crate::error::{AppError, ErrorBody};
use crate::extractors::JsonBody;
use crate::handlers::decode;
use crate::model::{CategoryPatch, CreateCategory};
use crate::response::{success_many, success_one, success_one_ok};
use crate::service::validation::parse_id;
use crate::service::CategoryService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

pub static CATEGORY_TAG: &str = "category";

#[utoipa::path(
    post,
    path = "/api/v1/categories",
    tag = CATEGORY_TAG,
    request_body = CreateCategory,
    responses(
        (status = 201, description = "Created category"),
        (status = 400, description = "Malformed id or body", body = ErrorBody),
        (status = 422, description = "Validation failed", body = ErrorBody)
    ),
)]
pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let input: CreateCategory = decode(body)?;
    Ok(success_one(CategoryService::create(state.store(), input).await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/categories",
    tag = CATEGORY_TAG,
    responses(
        (status = 200, description = "All categories")
    ),
)]
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let page = CategoryService::get_all(state.store()).await?;
    Ok(success_many(page.rows))
}

#[utoipa::path(
    get,
    path = "/api/v1/categories/{id}",
    tag = CATEGORY_TAG,
    params(("id" = String, Path, description = "Category id (uuid)")),
    responses(
        (status = 200, description = "Category"),
        (status = 400, description = "Malformed id or body", body = ErrorBody),
        (status = 404, description = "No row with that id", body = ErrorBody),
        (status = 422, description = "Validation failed", body = ErrorBody)
    ),
)]
pub async fn read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id)?;
    Ok(success_one_ok(CategoryService::get(state.store(), id).await?))
}

#[utoipa::path(
    patch,
    path = "/api/v1/categories/{id}",
    tag = CATEGORY_TAG,
    params(("id" = String, Path, description = "Category id (uuid)")),
    request_body = CategoryPatch,
    responses(
        (status = 200, description = "Updated category"),
        (status = 400, description = "Malformed id or body", body = ErrorBody),
        (status = 404, description = "No row with that id", body = ErrorBody),
        (status = 422, description = "Validation failed", body = ErrorBody)
    ),
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id)?;
    let patch: CategoryPatch = decode(body)?;
    Ok(success_one_ok(CategoryService::update(state.store(), id, patch).await?))
}

#[utoipa::path(
    delete,
    path = "/api/v1/categories/{id}",
    tag = CATEGORY_TAG,
    params(("id" = String, Path, description = "Category id (uuid)")),
    responses(
        (status = 200, description = "Deleted category"),
        (status = 400, description = "Malformed id or body", body = ErrorBody),
        (status = 404, description = "No row with that id", body = ErrorBody),
        (status = 422, description = "Validation failed", body = ErrorBody)
    ),
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id)?;
    Ok(success_one_ok(CategoryService::delete(state.store(), id).await?))
}
