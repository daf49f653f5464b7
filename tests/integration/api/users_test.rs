//! Registration API tests

use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::common::{assert_error_body, TestApp};

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/user")
        .json(&json!({ "username": "alice", "password": "hunter2" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["message"], "User registered successfully");
    assert!(body["user_id"].as_i64().is_some());
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_missing_password() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/user")
        .json(&json!({ "username": "alice" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_error_body(&response.json(), 400);
}

#[tokio::test]
async fn test_register_malformed_json() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/user")
        .bytes(bytes::Bytes::from_static(b"{not json"))
        .content_type("application/json")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_error_body(&response.json(), 400);
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = TestApp::new().await;
    let body = json!({ "username": "alice", "password": "hunter2" });

    let first = app.server.post("/user").json(&body).await;
    assert_eq!(first.status_code(), StatusCode::CREATED);

    let second = app.server.post("/user").json(&body).await;
    assert_eq!(second.status_code(), StatusCode::CONFLICT);
    assert_error_body(&second.json(), 409);
}
