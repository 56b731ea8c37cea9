#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use blog_api::{build_router, AppState, MemoryStore};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

pub const BODY_LIMIT: usize = 64 * 1024;

pub fn app() -> Router {
    app_with_limit(BODY_LIMIT)
}

pub fn app_with_limit(body_limit: usize) -> Router {
    build_router(AppState::new(Arc::new(MemoryStore::new())), body_limit)
}

pub struct Reply {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Value,
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Reply {
    send_with_cookie(app, method, uri, body, None).await
}

pub async fn send_with_cookie(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    cookie: Option<&str>,
) -> Reply {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let request = match body {
        Some(b) => {
            let payload = b.to_string();
            builder
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::CONTENT_LENGTH, payload.len())
                .body(Body::from(payload))
                .unwrap()
        }
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    Reply { status, headers, body }
}

/// Send an arbitrary body, optionally without a content type.
pub async fn send_raw(app: &Router, method: Method, uri: &str, content_type: Option<&str>, payload: &str) -> Reply {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_LENGTH, payload.len());
    if let Some(ct) = content_type {
        builder = builder.header(header::CONTENT_TYPE, ct);
    }
    let request = builder.body(Body::from(payload.to_string())).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    Reply { status, headers, body }
}

pub async fn create_user(app: &Router, username: &str, email: &str) -> Value {
    let reply = send(
        app,
        Method::POST,
        "/api/v1/users",
        Some(json!({ "username": username, "email": email })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CREATED, "{}", reply.body);
    reply.body["data"].clone()
}

pub async fn create_category(app: &Router, title: &str) -> Value {
    let reply = send(
        app,
        Method::POST,
        "/api/v1/categories",
        Some(json!({ "title": title, "description": format!("{} things", title) })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CREATED, "{}", reply.body);
    reply.body["data"].clone()
}

pub fn id(row: &Value) -> String {
    row["id"].as_str().unwrap().to_string()
}
