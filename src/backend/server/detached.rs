//! Run a write to completion even if the request is dropped
//!
//! A handler future can be cancelled at any await point (client disconnect,
//! `TimeoutLayer`). Writes that commit to the database and then invalidate the
//! cache must not stop in between, so they run on their own task and the
//! handler only awaits the result.

use std::future::Future;

use axum::http::StatusCode;

use crate::backend::error::{BackendError, BackendResult};

/// Spawn `work` and wait for it; the task keeps running if the caller is dropped
pub async fn run_detached<F, T>(work: F) -> BackendResult<T>
where
    F: Future<Output = BackendResult<T>> + Send + 'static,
    T: Send + 'static,
{
    tokio::spawn(work).await.map_err(|e| {
        tracing::error!("Write task failed: {}", e);
        BackendError::handler(StatusCode::INTERNAL_SERVER_ERROR, "Server error")
    })?
}
