//! Health, version comparison and the JSON fallback

use axum::{
    extract::{rejection::QueryRejection, Query},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::backend::error::{BackendError, BackendResult};
use crate::backend::validation::required_text;
use crate::shared::{compare_versions, VersionOrdering};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct CompareQuery {
    pub a: Option<String>,
    pub b: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CompareResponse {
    pub a: String,
    pub b: String,
    pub ordering: VersionOrdering,
}

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// `GET /versions/compare?a=..&b=..`
///
/// Unparsable version strings are a 400 naming the offending input.
pub async fn compare_versions_handler(
    query: Result<Query<CompareQuery>, QueryRejection>,
) -> BackendResult<Json<CompareResponse>> {
    let Query(query) = query?;
    let a = required_text("a", query.a)?;
    let b = required_text("b", query.b)?;

    let ordering = compare_versions(&a, &b)?;

    Ok(Json(CompareResponse {
        a,
        b,
        ordering: ordering.into(),
    }))
}

/// Unknown routes get the same JSON error body as everything else
pub async fn not_found_fallback() -> BackendError {
    BackendError::not_found("Route not found")
}
