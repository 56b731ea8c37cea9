//! Article handlers.

use crate::error::{AppError, ErrorBody};
use crate::extractors::JsonBody;
use crate::handlers::decode;
use crate::model::{ArticlePageInput, ArticlePatch, CreateArticle};
use crate::response::{success_one, success_one_ok, success_page};
use crate::service::validation::parse_id;
use crate::service::ArticleService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

pub static ARTICLE_TAG: &str = "article";

#[utoipa::path(
    post,
    path = "/api/v1/articles",
    tag = ARTICLE_TAG,
    request_body = CreateArticle,
    responses(
        (status = 201, description = "Created article"),
        (status = 400, description = "Malformed id or body", body = ErrorBody),
        (status = 422, description = "Validation failed", body = ErrorBody)
    ),
)]
pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let input: CreateArticle = decode(body)?;
    Ok(success_one(ArticleService::create(state.store(), input).await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/articles/{id}",
    tag = ARTICLE_TAG,
    params(("id" = String, Path, description = "Article id (uuid)")),
    responses(
        (status = 200, description = "Article"),
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
    Ok(success_one_ok(ArticleService::get(state.store(), id).await?))
}

#[utoipa::path(
    patch,
    path = "/api/v1/articles/{id}",
    tag = ARTICLE_TAG,
    params(("id" = String, Path, description = "Article id (uuid)")),
    request_body = ArticlePatch,
    responses(
        (status = 200, description = "Updated article"),
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
    let patch: ArticlePatch = decode(body)?;
    Ok(success_one_ok(ArticleService::update(state.store(), id, patch).await?))
}

#[utoipa::path(
    delete,
    path = "/api/v1/articles/{id}",
    tag = ARTICLE_TAG,
    params(("id" = String, Path, description = "Article id (uuid)")),
    responses(
        (status = 200, description = "Deleted article"),
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
    Ok(success_one_ok(ArticleService::delete(state.store(), id).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/articles/page",
    tag = ARTICLE_TAG,
    request_body = ArticlePageInput,
    responses(
        (status = 200, description = "Page of articles"),
        (status = 400, description = "Malformed id or body", body = ErrorBody),
        (status = 422, description = "Validation failed", body = ErrorBody)
    ),
)]
pub async fn page(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let input: ArticlePageInput = decode(body)?;
    let page = ArticleService::get_page(state.store(), input).await?;
    Ok(success_page(page.rows, Some(page.offset), page.limit))
}
