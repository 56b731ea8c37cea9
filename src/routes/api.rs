//! Versioned API procedures: users, articles, categories and locale.

use crate::handlers::{article, category, locale, user};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/users", post(user::create))
        .route("/users/by", get(user::get_by))
        .route("/users/page", post(user::page))
        .route("/users/:id", get(user::read).patch(user::update).delete(user::delete))
        .route("/users/:id/remove", post(user::remove))
        .route("/users/:id/restore", post(user::restore))
        .route("/users/:id/block", post(user::block))
        .route("/users/:id/unblock", post(user::unblock))
        .route("/articles", post(article::create))
        .route("/articles/page", post(article::page))
        .route(
            "/articles/:id",
            get(article::read).patch(article::update).delete(article::delete),
        )
        .route("/categories", get(category::list).post(category::create))
        .route(
            "/categories/:id",
            get(category::read).patch(category::update).delete(category::delete),
        )
        .route("/locale", get(locale::get_locale).put(locale::set_locale))
        .with_state(state)
}
