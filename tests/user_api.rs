mod common;

use async_trait::async_trait;
use axum::http::{Method, StatusCode};
use blog_api::model::EntityDef;
use blog_api::query::QuerySpec;
use blog_api::store::Record;
use blog_api::{build_router, AppError, AppState, MemoryStore, Store};
use common::{app, create_user, id, send, send_raw, BODY_LIMIT};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use uuid::Uuid;

/// Memory store that counts list reads.
#[derive(Default)]
struct CountingStore {
    inner: MemoryStore,
    list_reads: Arc<AtomicUsize>,
}

#[async_trait]
impl Store for CountingStore {
    async fn ping(&self) -> Result<(), AppError> {
        self.inner.ping().await
    }

    async fn insert(&self, entity: &EntityDef, values: &Record) -> Result<Value, AppError> {
        self.inner.insert(entity, values).await
    }

    async fn find_by_id(&self, entity: &EntityDef, id: Uuid) -> Result<Option<Value>, AppError> {
        self.inner.find_by_id(entity, id).await
    }

    async fn find_many(&self, entity: &EntityDef, query: &QuerySpec) -> Result<Vec<Value>, AppError> {
        self.list_reads.fetch_add(1, Ordering::SeqCst);
        self.inner.find_many(entity, query).await
    }

    async fn update(&self, entity: &EntityDef, id: Uuid, values: &Record) -> Result<Option<Value>, AppError> {
        self.inner.update(entity, id, values).await
    }

    async fn delete(&self, entity: &EntityDef, id: Uuid) -> Result<Option<Value>, AppError> {
        self.inner.delete(entity, id).await
    }
}

#[tokio::test]
async fn create_returns_camel_case_row_with_defaults() {
    let app = app();
    let user = create_user(&app, "ann", "ann@example.com").await;
    assert_eq!(user["username"], "ann");
    assert!(user["createdAt"].is_string());
    assert!(user["deletedAt"].is_null());
    assert!(user.get("created_at").is_none());
}

#[tokio::test]
async fn create_rejects_bad_email_and_unknown_keys() {
    let app = app();
    let reply = send(
        &app,
        Method::POST,
        "/api/v1/users",
        Some(json!({ "username": "ann", "email": "not-an-email" })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(reply.body["error"]["code"], "validation_error");

    let reply = send(
        &app,
        Method::POST,
        "/api/v1/users",
        Some(json!({ "username": "ann", "email": "ann@example.com", "role": "admin" })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn duplicate_email_conflicts() {
    let app = app();
    create_user(&app, "ann", "ann@example.com").await;
    let reply = send(
        &app,
        Method::POST,
        "/api/v1/users",
        Some(json!({ "username": "bob", "email": "ann@example.com" })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn patch_writes_only_present_fields() {
    let app = app();
    let user = create_user(&app, "ann", "ann@example.com").await;
    let reply = send(
        &app,
        Method::PATCH,
        &format!("/api/v1/users/{}", id(&user)),
        Some(json!({ "avatarUrl": "https://cdn.example.com/ann.png" })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["data"]["avatarUrl"], "https://cdn.example.com/ann.png");
    assert_eq!(reply.body["data"]["username"], "ann");
    assert_eq!(reply.body["data"]["email"], "ann@example.com");
}

#[tokio::test]
async fn remove_and_restore_toggle_deleted_at() {
    let app = app();
    let user = create_user(&app, "ann", "ann@example.com").await;
    let uid = id(&user);

    let removed = send(&app, Method::POST, &format!("/api/v1/users/{}/remove", uid), None).await;
    assert_eq!(removed.status, StatusCode::OK);
    assert!(removed.body["data"]["deletedAt"].is_string());

    let read = send(&app, Method::GET, &format!("/api/v1/users/{}", uid), None).await;
    assert_eq!(read.status, StatusCode::OK);

    let restored = send(&app, Method::POST, &format!("/api/v1/users/{}/restore", uid), None).await;
    assert!(restored.body["data"]["deletedAt"].is_null());
}

#[tokio::test]
async fn block_and_unblock() {
    let app = app();
    let user = create_user(&app, "ann", "ann@example.com").await;
    let uid = id(&user);

    let blocked = send(
        &app,
        Method::POST,
        &format!("/api/v1/users/{}/block", uid),
        Some(json!({ "blockReason": "spam" })),
    )
    .await;
    assert_eq!(blocked.status, StatusCode::OK);
    assert_eq!(blocked.body["data"]["blockReason"], "spam");
    assert!(blocked.body["data"]["blockedAt"].is_string());

    let unblocked = send(&app, Method::POST, &format!("/api/v1/users/{}/unblock", uid), None).await;
    assert!(unblocked.body["data"]["blockReason"].is_null());
    assert!(unblocked.body["data"]["blockedAt"].is_null());
}

#[tokio::test]
async fn hard_delete_then_missing() {
    let app = app();
    let user = create_user(&app, "ann", "ann@example.com").await;
    let uri = format!("/api/v1/users/{}", id(&user));

    let deleted = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["data"]["username"], "ann");

    assert_eq!(send(&app, Method::GET, &uri, None).await.status, StatusCode::NOT_FOUND);
    let again = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
    assert_eq!(again.body["error"]["code"], "not_found");
}

#[tokio::test]
async fn malformed_id_is_bad_request() {
    let app = app();
    let reply = send(&app, Method::GET, "/api/v1/users/not-a-uuid", None).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_by_matches_exact_keys() {
    let app = app();
    create_user(&app, "ann", "ann@example.com").await;
    create_user(&app, "bob", "bob@example.com").await;

    let reply = send(&app, Method::GET, "/api/v1/users/by?username=bob", None).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["data"]["email"], "bob@example.com");

    let reply = send(&app, Method::GET, "/api/v1/users/by?username=bo", None).await;
    assert!(reply.body["data"].is_null());

    let reply = send(&app, Method::GET, "/api/v1/users/by", None).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body["data"].is_null());
}

#[tokio::test]
async fn page_filters_searches_and_orders() {
    let app = app();
    create_user(&app, "alice", "alice@example.com").await;
    create_user(&app, "alina", "alina@corp.com").await;
    create_user(&app, "bob", "bob@example.com").await;

    let reply = send(
        &app,
        Method::POST,
        "/api/v1/users/page",
        Some(json!({
            "filter": [],
            "search": [{ "field": "username", "value": "ali" }],
            "order": [{ "field": "username", "direction": "desc" }]
        })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK, "{}", reply.body);
    let names: Vec<&str> = reply.body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["username"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["alina", "alice"]);
    assert_eq!(reply.body["meta"]["count"], 2);
    assert_eq!(reply.body["meta"]["limit"], 10);

    let reply = send(
        &app,
        Method::POST,
        "/api/v1/users/page",
        Some(json!({
            "filter": [{ "field": "email", "value": "bob@example.com" }],
            "search": [{ "field": "email", "value": "example" }]
        })),
    )
    .await;
    let rows = reply.body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["username"], "bob");
}

#[tokio::test]
async fn page_window_applies_offset_and_limit() {
    let app = app();
    for name in ["a1", "a2", "a3", "a4"] {
        create_user(&app, name, &format!("{}@example.com", name)).await;
    }
    let reply = send(
        &app,
        Method::POST,
        "/api/v1/users/page",
        Some(json!({
            "filter": [],
            "offset": 1,
            "limit": 2,
            "order": [{ "field": "username", "direction": "asc" }]
        })),
    )
    .await;
    let names: Vec<&str> = reply.body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["username"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["a2", "a3"]);
    assert_eq!(reply.body["meta"]["offset"], 1);
}

#[tokio::test]
async fn page_rejects_fields_outside_the_allow_list() {
    let app = app();
    create_user(&app, "ann", "ann@example.com").await;

    for (body, kind) in [
        (json!({ "filter": [{ "field": "avatarUrl", "value": "x" }] }), "filter"),
        (json!({ "filter": [], "search": [{ "field": "id", "value": "x" }] }), "search"),
        (json!({ "filter": [], "order": [{ "field": "blockReason", "direction": "asc" }] }), "order"),
    ] {
        let reply = send(&app, Method::POST, "/api/v1/users/page", Some(body)).await;
        assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(reply.body["error"]["code"], "invalid_field");
        assert_eq!(reply.body["error"]["details"]["kind"], kind);
    }
}

#[tokio::test]
async fn page_requires_filter_and_positive_limit() {
    let app = app();
    let reply = send(&app, Method::POST, "/api/v1/users/page", Some(json!({}))).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);

    let reply = send(
        &app,
        Method::POST,
        "/api/v1/users/page",
        Some(json!({ "filter": [], "limit": 0 })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(reply.body["error"]["code"], "validation_error");
}

#[tokio::test]
async fn unlisted_field_never_reaches_the_store() {
    let store = CountingStore::default();
    let list_reads = store.list_reads.clone();
    let app = build_router(AppState::new(Arc::new(store)), BODY_LIMIT);

    let reply = send(
        &app,
        Method::POST,
        "/api/v1/users/page",
        Some(json!({ "filter": [], "order": [{ "field": "blockReason", "direction": "asc" }] })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(list_reads.load(Ordering::SeqCst), 0);

    let reply = send(&app, Method::POST, "/api/v1/users/page", Some(json!({ "filter": [] }))).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(list_reads.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn malformed_json_uses_the_error_envelope() {
    let app = app();
    let reply = send_raw(
        &app,
        Method::POST,
        "/api/v1/users/page",
        Some("application/json"),
        r#"{"filter": ["#,
    )
    .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["error"]["code"], "bad_request");

    let reply = send_raw(&app, Method::POST, "/api/v1/users", None, r#"{"username":"ann"}"#).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["error"]["code"], "bad_request");
}

#[tokio::test]
async fn patch_writes_present_empty_strings() {
    let app = app();
    let user = create_user(&app, "ann", "ann@example.com").await;
    let uri = format!("/api/v1/users/{}", id(&user));
    send(&app, Method::PATCH, &uri, Some(json!({ "phone": "+100" }))).await;

    let reply = send(&app, Method::PATCH, &uri, Some(json!({ "phone": "" }))).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["data"]["phone"], "");
    assert_eq!(reply.body["data"]["username"], "ann");
}
