//! User handlers: CRUD, soft delete, blocking, lookup and paged listing.

use crate::error::{AppError, ErrorBody};
use crate::extractors::JsonBody;
use crate::handlers::decode;
use crate::model::{BlockUser, CreateUser, UserLookup, UserPageInput, UserPatch};
use crate::response::{success_one, success_one_ok, success_page};
use crate::service::validation::parse_id;
use crate::service::UserService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use std::collections::HashMap;

pub static USER_TAG: &str = "user";

#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = USER_TAG,
    request_body = CreateUser,
    responses(
        (status = 201, description = "Created user"),
        (status = 400, description = "Malformed id or body", body = ErrorBody),
        (status = 422, description = "Validation failed", body = ErrorBody)
    ),
)]
pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let input: CreateUser = decode(body)?;
    let row = UserService::create(state.store(), input).await?;
    Ok(success_one(row))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = USER_TAG,
    params(("id" = String, Path, description = "User id (uuid)")),
    responses(
        (status = 200, description = "User"),
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
    Ok(success_one_ok(UserService::get(state.store(), id).await?))
}

#[utoipa::path(
    patch,
    path = "/api/v1/users/{id}",
    tag = USER_TAG,
    params(("id" = String, Path, description = "User id (uuid)")),
    request_body = UserPatch,
    responses(
        (status = 200, description = "Updated user"),
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
    let patch: UserPatch = decode(body)?;
    Ok(success_one_ok(UserService::update(state.store(), id, patch).await?))
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = USER_TAG,
    params(("id" = String, Path, description = "User id (uuid)")),
    responses(
        (status = 200, description = "Deleted user"),
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
    Ok(success_one_ok(UserService::delete(state.store(), id).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/users/{id}/remove",
    tag = USER_TAG,
    params(("id" = String, Path, description = "User id (uuid)")),
    responses(
        (status = 200, description = "Soft-deleted user"),
        (status = 400, description = "Malformed id or body", body = ErrorBody),
        (status = 404, description = "No row with that id", body = ErrorBody),
        (status = 422, description = "Validation failed", body = ErrorBody)
    ),
)]
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id)?;
    Ok(success_one_ok(UserService::remove(state.store(), id).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/users/{id}/restore",
    tag = USER_TAG,
    params(("id" = String, Path, description = "User id (uuid)")),
    responses(
        (status = 200, description = "Restored user"),
        (status = 400, description = "Malformed id or body", body = ErrorBody),
        (status = 404, description = "No row with that id", body = ErrorBody),
        (status = 422, description = "Validation failed", body = ErrorBody)
    ),
)]
pub async fn restore(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id)?;
    Ok(success_one_ok(UserService::restore(state.store(), id).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/users/{id}/block",
    tag = USER_TAG,
    params(("id" = String, Path, description = "User id (uuid)")),
    request_body = BlockUser,
    responses(
        (status = 200, description = "Blocked user"),
        (status = 400, description = "Malformed id or body", body = ErrorBody),
        (status = 404, description = "No row with that id", body = ErrorBody),
        (status = 422, description = "Validation failed", body = ErrorBody)
    ),
)]
pub async fn block(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id)?;
    let input: BlockUser = decode(body)?;
    Ok(success_one_ok(UserService::block(state.store(), id, input).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/users/{id}/unblock",
    tag = USER_TAG,
    params(("id" = String, Path, description = "User id (uuid)")),
    responses(
        (status = 200, description = "Unblocked user"),
        (status = 400, description = "Malformed id or body", body = ErrorBody),
        (status = 404, description = "No row with that id", body = ErrorBody),
        (status = 422, description = "Validation failed", body = ErrorBody)
    ),
)]
pub async fn unblock(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id)?;
    Ok(success_one_ok(UserService::unblock(state.store(), id).await?))
}

/// GET /users/by?email=&username=&phone=. `data` is null when no key is given or nothing matches.
#[utoipa::path(
    get,
    path = "/api/v1/users/by",
    tag = USER_TAG,
    params(
        ("email" = Option<String>, Query, description = "Exact email"),
        ("username" = Option<String>, Query, description = "Exact username"),
        ("phone" = Option<String>, Query, description = "Exact phone")
    ),
    responses(
        (status = 200, description = "First matching user or null"),
        (status = 400, description = "Malformed id or body", body = ErrorBody),
        (status = 422, description = "Validation failed", body = ErrorBody)
    ),
)]
pub async fn get_by(
    State(state): State<AppState>,
    Query(mut params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let lookup = UserLookup {
        email: params.remove("email"),
        username: params.remove("username"),
        phone: params.remove("phone"),
    };
    if let Some(key) = params.keys().next() {
        return Err(AppError::BadRequest(format!("unknown lookup key: {}", key)));
    }
    Ok(success_one_ok(UserService::get_by(state.store(), lookup).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/users/page",
    tag = USER_TAG,
    request_body = UserPageInput,
    responses(
        (status = 200, description = "Page of users"),
        (status = 400, description = "Malformed id or body", body = ErrorBody),
        (status = 422, description = "Validation failed", body = ErrorBody)
    ),
)]
pub async fn page(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let input: UserPageInput = decode(body)?;
    let page = UserService::get_page(state.store(), input).await?;
    Ok(success_page(page.rows, Some(page.offset), page.limit))
}
