//! Application fixture
//!
//! Builds the real router over a SQLite file and storage directories inside
//! a `TempDir`. The directory lives as long as the fixture.

use std::path::Path;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use axum_test::TestServer;
use bytes::Bytes;
use serde_json::{json, Value};
use tower::ServiceExt;
use sqlx::SqlitePool;
use tempfile::TempDir;

use docvault::backend::server::config::load_database;
use docvault::backend::server::{create_app, ServerConfig};

/// Configuration rooted in `dir`
pub fn test_config(dir: &Path) -> ServerConfig {
    ServerConfig {
        database_url: format!("sqlite://{}", dir.join("test.db").display()),
        upload_dir: dir.join("uploads"),
        storage_dir: dir.join("storage"),
        ..ServerConfig::default()
    }
}

/// An open, migrated pool for database-level tests
pub async fn test_pool(dir: &Path) -> SqlitePool {
    load_database(&test_config(dir))
        .await
        .expect("Failed to open test database")
}

const BOUNDARY: &str = "docvault-test-boundary";

/// A multipart upload carrying `bytes` in the `document` field
pub fn upload_request(uri: &str, filename: &str, bytes: &[u8]) -> Request<Body> {
    let mut body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"document\"; filename=\"{filename}\"\r\n\
         Content-Type: application/octet-stream\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::post(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .expect("Failed to build upload request")
}

/// A JSON request
pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("Failed to build JSON request")
}

/// A bodiless GET
pub fn get_request(uri: &str) -> Request<Body> {
    Request::get(uri)
        .body(Body::empty())
        .expect("Failed to build GET request")
}

/// Send one request through a router clone; usable from spawned tasks
pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, Bytes) {
    let response = router
        .oneshot(request)
        .await
        .expect("Router is infallible");
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    (status, body)
}

pub struct TestApp {
    pub server: TestServer,
    /// The same app as `server`, for driving requests from many tasks at once
    pub router: Router,
    pub config: ServerConfig,
    _dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Build the app after adjusting the default test configuration
    pub async fn with_config(adjust: impl FnOnce(&mut ServerConfig)) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let mut config = test_config(dir.path());
        adjust(&mut config);

        let router = create_app(config.clone())
            .await
            .expect("Failed to create app");
        let server = TestServer::new(router.clone()).expect("Failed to create test server");

        Self {
            server,
            router,
            config,
            _dir: dir,
        }
    }

    /// Create a relational document and return its id
    pub async fn create_document(&self, title: &str, content: &str) -> i64 {
        let response = self
            .server
            .post("/document")
            .json(&json!({ "title": title, "content": content, "user_id": 1 }))
            .await;
        let body: Value = response.json();
        body["document_id"].as_i64().expect("document_id missing")
    }

    /// Create a versioned document and return its id
    pub async fn create_stored_document(&self) -> String {
        let response = self.server.post("/documents").await;
        let body: Value = response.json();
        body["doc_id"].as_str().expect("doc_id missing").to_string()
    }
}
