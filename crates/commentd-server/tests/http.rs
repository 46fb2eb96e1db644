//! Router tests: wire requests map 1:1 onto store operations.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header::CONTENT_TYPE},
};
use tower::ServiceExt;

use commentd_core::Comment;
use commentd_db_memory::{MemoryCommentCache, MemoryCommentDatabase};
use commentd_server::server::{AppState, build_app};
use commentd_server::store::CommentStore;

fn test_app() -> (Router, Arc<MemoryCommentDatabase>) {
    let db = Arc::new(MemoryCommentDatabase::new());
    let cache = Arc::new(MemoryCommentCache::new());
    let store = Arc::new(CommentStore::new(db.clone(), cache));
    (build_app(AppState { store }), db)
}

async fn body_json(res: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

#[tokio::test]
async fn health_endpoints_respond() {
    let (app, _) = test_app();

    let res = app.clone().oneshot(get("/healthz")).await.expect("healthz");
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.oneshot(get("/readyz")).await.expect("readyz");
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn empty_video_lists_as_empty_json() {
    let (app, _) = test_app();

    let res = app
        .oneshot(get("/videos/v1/comments"))
        .await
        .expect("list");
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await, serde_json::json!({ "comments": [] }));
}

#[tokio::test]
async fn create_then_fetch_comment() {
    let (app, _) = test_app();

    let res = app
        .clone()
        .oneshot(post_json(
            "/comments",
            r#"{"video_id":"v1","user_id":"u1","content":"hello"}"#,
        ))
        .await
        .expect("create");
    assert_eq!(res.status(), StatusCode::CREATED);

    let created: Comment = serde_json::from_value(body_json(res).await).expect("comment");
    assert_eq!(created.video_id, "v1");
    assert_eq!(created.likes, 0);
    assert_eq!(created.id.len(), 32);

    let res = app
        .clone()
        .oneshot(get(&format!("/comments/{}", created.id)))
        .await
        .expect("fetch");
    assert_eq!(res.status(), StatusCode::OK);
    let fetched: Comment = serde_json::from_value(body_json(res).await).expect("comment");
    assert_eq!(fetched, created);

    let res = app
        .oneshot(get("/videos/v1/comments"))
        .await
        .expect("list");
    let list = body_json(res).await;
    assert_eq!(list["comments"].as_array().expect("array").len(), 1);
}

#[tokio::test]
async fn unknown_comment_is_404_with_kind() {
    let (app, _) = test_app();

    let res = app
        .oneshot(get("/comments/does-not-exist"))
        .await
        .expect("fetch");
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(res).await["kind"], "not_found");
}

#[tokio::test]
async fn blank_fields_are_rejected_as_400() {
    let (app, db) = test_app();

    let res = app
        .oneshot(post_json(
            "/comments",
            r#"{"video_id":"v1","user_id":"u1","content":""}"#,
        ))
        .await
        .expect("create");
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(res).await["kind"], "validation");
    assert_eq!(db.insert_count(), 0);
}

#[tokio::test]
async fn unreachable_database_is_503() {
    let (app, db) = test_app();
    db.set_unavailable(true);

    let res = app
        .clone()
        .oneshot(get("/videos/v1/comments"))
        .await
        .expect("list");
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body_json(res).await["kind"], "unavailable");

    let res = app.oneshot(get("/comments/abc")).await.expect("fetch");
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let (app, _) = test_app();

    let res = app.clone().oneshot(get("/healthz")).await.expect("healthz");
    assert!(res.headers().contains_key("x-request-id"));

    // A caller-supplied id is echoed back.
    let req = Request::builder()
        .uri("/healthz")
        .header("x-request-id", "caller-id-1")
        .body(Body::empty())
        .expect("request");
    let res = app.oneshot(req).await.expect("healthz");
    assert_eq!(res.headers()["x-request-id"], "caller-id-1");
}
