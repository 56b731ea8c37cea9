//! Router assembly: common probes, the `/api/v1` procedures and the OpenAPI document.

mod api;
mod common;

pub use api::api_routes;
pub use common::common_routes;

use crate::openapi::ApiDoc;
use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, routing::get, Json, Router};
use tower_cookies::CookieManagerLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

pub const API_PREFIX: &str = "/api/v1";

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Full application router with cookie, body-limit and trace layers applied.
pub fn build_router(state: AppState, body_limit: usize) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .nest(API_PREFIX, api_routes(state))
        .route("/api-docs/openapi.json", get(openapi_json))
        .layer(CookieManagerLayer::new())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(TraceLayer::new_for_http())
}
