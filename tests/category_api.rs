mod common;

use axum::http::{Method, StatusCode};
use common::{app, create_category, id, send};
use serde_json::json;

#[tokio::test]
async fn list_returns_every_category() {
    let app = app();
    create_category(&app, "rust").await;
    create_category(&app, "go").await;
    let reply = send(&app, Method::GET, "/api/v1/categories", None).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["meta"]["count"], 2);
    assert!(reply.body["meta"].get("limit").is_none());
}

#[tokio::test]
async fn title_length_is_bounded() {
    let app = app();
    for title in [String::new(), "x".repeat(129)] {
        let reply = send(
            &app,
            Method::POST,
            "/api/v1/categories",
            Some(json!({ "title": title, "description": "d" })),
        )
        .await;
        assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);
    }
    let reply = send(
        &app,
        Method::POST,
        "/api/v1/categories",
        Some(json!({ "title": "ж".repeat(128), "description": "d" })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CREATED);
}

#[tokio::test]
async fn parent_link_and_self_parent() {
    let app = app();
    let parent = id(&create_category(&app, "languages").await);
    let reply = send(
        &app,
        Method::POST,
        "/api/v1/categories",
        Some(json!({ "title": "rust", "description": "d", "parentId": parent })),
    )
    .await;
    assert_eq!(reply.body["data"]["parentId"], parent.as_str());

    let reply = send(
        &app,
        Method::PATCH,
        &format!("/api/v1/categories/{}", parent),
        Some(json!({ "parentId": parent })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn update_and_delete_missing_category() {
    let app = app();
    let missing = "00000000-0000-4000-8000-000000000000";
    let reply = send(
        &app,
        Method::PATCH,
        &format!("/api/v1/categories/{}", missing),
        Some(json!({ "title": "x" })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    let reply = send(&app, Method::DELETE, &format!("/api/v1/categories/{}", missing), None).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
}
