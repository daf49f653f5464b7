/**
 * Error Conversion
 *
 * Converts backend errors and axum extractor rejections into HTTP responses.
 *
 * # Response Format
 *
 * Error responses are returned as JSON with the following structure:
 * ```json
 * {
 *   "error": "Error message",
 *   "status": 400
 * }
 * ```
 */

use axum::{
    extract::{
        multipart::MultipartError,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use crate::backend::error::types::BackendError;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("Request failed with {}: {}", status, self.message());
        } else {
            tracing::debug!("Request rejected with {}: {}", status, self.message());
        }

        let body = serde_json::json!({
            "error": self.public_message(),
            "status": status.as_u16(),
        });

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for BackendError {
    fn from(rejection: JsonRejection) -> Self {
        BackendError::handler(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

impl From<QueryRejection> for BackendError {
    fn from(rejection: QueryRejection) -> Self {
        BackendError::handler(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

impl From<MultipartError> for BackendError {
    fn from(err: MultipartError) -> Self {
        BackendError::handler(err.status(), err.body_text())
    }
}
