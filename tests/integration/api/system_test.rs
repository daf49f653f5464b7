//! Health, comparison and fallback tests

use axum::http::StatusCode;
use serde_json::Value;

use crate::common::{assert_error_body, TestApp};

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;

    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["status"], "ok");
}

#[tokio::test]
async fn test_compare_versions() {
    let app = TestApp::new().await;

    let cases = [
        ("1.10.0", "1.9.9", "greater"),
        ("1.0", "1.0.0", "equal"),
        ("1.0.0-alpha", "1.0.0", "less"),
    ];
    for (a, b, expected) in cases {
        let response = app
            .server
            .get("/versions/compare")
            .add_query_param("a", a)
            .add_query_param("b", b)
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.json::<Value>()["ordering"], expected, "{a} vs {b}");
    }
}

#[tokio::test]
async fn test_compare_rejects_bad_input() {
    let app = TestApp::new().await;

    let missing = app.server.get("/versions/compare?a=1.0").await;
    assert_eq!(missing.status_code(), StatusCode::BAD_REQUEST);

    let garbage = app
        .server
        .get("/versions/compare")
        .add_query_param("a", "1.x")
        .add_query_param("b", "1.0")
        .await;
    assert_eq!(garbage.status_code(), StatusCode::BAD_REQUEST);
    assert_error_body(&garbage.json(), 400);
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let app = TestApp::new().await;

    let response = app.server.get("/no/such/route").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_error_body(&response.json(), 404);
}
