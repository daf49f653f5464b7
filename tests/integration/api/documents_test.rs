//! Relational document API tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{assert_error_body, TestApp};

#[tokio::test]
async fn test_create_then_get_starts_at_version_one() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/document")
        .json(&json!({ "title": "Notes", "content": "first draft", "user_id": 7 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let id = response.json::<Value>()["document_id"].as_i64().unwrap();

    let response = app.server.get(&format!("/document/{id}")).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({ "document": { "title": "Notes", "body": "first draft", "version": 1 } })
    );
}

#[tokio::test]
async fn test_create_mirrors_body_to_storage() {
    let app = TestApp::new().await;
    let id = app.create_document("Notes", "mirrored").await;

    let path = app.config.storage_dir.join(format!("{id}.txt"));
    assert_eq!(std::fs::read_to_string(path).unwrap(), "mirrored");
}

#[tokio::test]
async fn test_create_missing_field() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/document")
        .json(&json!({ "title": "Notes", "user_id": 1 }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_error_body(&response.json(), 400);
}

#[tokio::test]
async fn test_updates_increment_version_by_one_each() {
    let app = TestApp::new().await;
    let id = app.create_document("Notes", "v1").await;

    for n in 2..=4i64 {
        let response = app
            .server
            .put(&format!("/document/{id}"))
            .json(&json!({ "title": "Notes", "content": format!("v{n}") }))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.json::<Value>()["version"], n);
    }

    let body: Value = app.server.get(&format!("/document/{id}")).await.json();
    assert_eq!(body["document"]["version"], 4);
    assert_eq!(body["document"]["body"], "v4");
}

#[tokio::test]
async fn test_get_after_update_is_not_stale() {
    let app = TestApp::new().await;
    let id = app.create_document("Notes", "old").await;

    // Populate the cache first.
    app.server.get(&format!("/document/{id}")).await;

    app.server
        .put(&format!("/document/{id}"))
        .json(&json!({ "title": "Renamed", "content": "new" }))
        .await;

    let body: Value = app.server.get(&format!("/document/{id}")).await.json();
    assert_eq!(body["document"]["title"], "Renamed");
    assert_eq!(body["document"]["version"], 2);
}

#[tokio::test]
async fn test_get_unknown_or_malformed_id() {
    let app = TestApp::new().await;

    for path in ["/document/9999", "/document/abc"] {
        let response = app.server.get(path).await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
        assert_error_body(&response.json(), 404);
    }
}

#[tokio::test]
async fn test_update_unknown_document_is_not_found_before_validation() {
    let app = TestApp::new().await;

    let response = app
        .server
        .put("/document/9999")
        .json(&json!({ "title": "only a title" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_missing_field() {
    let app = TestApp::new().await;
    let id = app.create_document("Notes", "body").await;

    let response = app
        .server
        .put(&format!("/document/{id}"))
        .json(&json!({ "title": "Notes" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let body: Value = app.server.get(&format!("/document/{id}")).await.json();
    assert_eq!(body["document"]["version"], 1);
}

#[tokio::test]
async fn test_update_with_stale_version_conflicts() {
    let app = TestApp::new().await;
    let id = app.create_document("Notes", "v1").await;

    let ok = app
        .server
        .put(&format!("/document/{id}"))
        .json(&json!({ "title": "Notes", "content": "v2", "version": 1 }))
        .await;
    assert_eq!(ok.status_code(), StatusCode::OK);

    let stale = app
        .server
        .put(&format!("/document/{id}"))
        .json(&json!({ "title": "Notes", "content": "lost", "version": 1 }))
        .await;
    assert_eq!(stale.status_code(), StatusCode::CONFLICT);
    assert_error_body(&stale.json(), 409);

    let body: Value = app.server.get(&format!("/document/{id}")).await.json();
    assert_eq!(body["document"]["body"], "v2");
    assert_eq!(body["document"]["version"], 2);
}

#[tokio::test]
async fn test_share_accepts_unknown_ids_and_lists() {
    let app = TestApp::new().await;
    let id = app.create_document("Notes", "body").await;

    for user_id in [11, 12] {
        let response = app
            .server
            .post("/document/share")
            .json(&json!({ "document_id": id, "user_id": user_id }))
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
        assert_eq!(response.json::<Value>()["message"], "Document shared successfully");
    }

    let response = app
        .server
        .post("/document/share")
        .json(&json!({ "document_id": 424242, "user_id": 999 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let body: Value = app.server.get(&format!("/document/{id}/shares")).await.json();
    let users: Vec<i64> = body["shares"]
        .as_array()
        .unwrap()
        .iter()
        .map(|share| share["user_id"].as_i64().unwrap())
        .collect();
    assert_eq!(users, vec![11, 12]);
}

#[tokio::test]
async fn test_share_missing_field() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/document/share")
        .json(&json!({ "document_id": 1 }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}
