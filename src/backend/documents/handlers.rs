//! Document HTTP Handlers
//!
//! Handlers for the relational document endpoints. Reads go through the
//! document cache; updates invalidate it.
//!
//! A cache miss is filled while holding the document's cache lock, and
//! writes commit, invalidate and mirror under the same lock. A read that
//! started before a write therefore cannot put its result into the cache
//! after that write, and the mirror file follows commit order.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use sqlx::SqlitePool;

use crate::backend::cache::keys::document_key;
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::server::run_detached;
use crate::backend::server::state::AppState;
use crate::backend::validation::{required_id, required_text};
use crate::shared::{DocumentEnvelope, DocumentView};
use super::db::{self, DocumentRecord};
use super::types::{
    CreateDocumentRequest, CreateDocumentResponse, ListSharesResponse, ShareDocumentRequest,
    ShareDocumentResponse, UpdateDocumentRequest, UpdateDocumentResponse,
};

/// Parse a path id; anything that is not an integer names no document
fn parse_document_id(raw: &str) -> BackendResult<i64> {
    raw.parse::<i64>()
        .map_err(|_| BackendError::not_found("Document not found"))
}

/// Mirror the latest body to `<storage>/<id>.txt`
///
/// Callers hold the document's cache lock. A failed mirror is only logged.
async fn mirror_body(state: &AppState, document: i64, body: &str) {
    let path = state.storage.document_path(document);
    if let Err(e) = state.storage.write_text(&path, body).await {
        tracing::warn!("Failed to mirror document {} to {}: {}", document, path.display(), e.message());
    }
}

/// Load a document through the cache
async fn load_document(state: &AppState, id: i64) -> BackendResult<Option<DocumentRecord>> {
    let key = document_key(id);
    if let Some(document) = state.document_cache.get(&key).await {
        tracing::debug!("Cache hit for {}", key);
        return Ok(Some(document));
    }

    let _guard = state.cache_locks.lock(&key).await;
    // Another reader may have filled it while we waited.
    if let Some(document) = state.document_cache.get(&key).await {
        return Ok(Some(document));
    }

    let document = db::get_document(&state.db_pool, id).await?;
    if let Some(document) = &document {
        state.document_cache.insert(key, document.clone()).await;
    }
    Ok(document)
}

/// `POST /document`
pub async fn create_document(
    State(state): State<AppState>,
    payload: Result<Json<CreateDocumentRequest>, JsonRejection>,
) -> BackendResult<(StatusCode, Json<CreateDocumentResponse>)> {
    let Json(request) = payload?;
    let title = required_text("title", request.title)?;
    let content = required_text("content", request.content)?;
    let user_id = required_id("user_id", request.user_id)?;

    let writer = state.clone();
    let id = run_detached(async move {
        let id = db::create_document(&writer.db_pool, user_id, &title, &content).await?;
        let _guard = writer.cache_locks.lock(&document_key(id)).await;
        mirror_body(&writer, id, &content).await;
        Ok::<_, BackendError>(id)
    })
    .await?;
    tracing::info!("Created document {} for user {}", id, user_id);

    Ok((
        StatusCode::CREATED,
        Json(CreateDocumentResponse {
            message: "Document added successfully".to_string(),
            document_id: id,
        }),
    ))
}

/// `GET /document/{id}`
pub async fn get_document(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> BackendResult<Json<DocumentEnvelope<DocumentView>>> {
    let id = parse_document_id(&raw_id)?;
    let document = load_document(&state, id)
        .await?
        .ok_or_else(|| BackendError::not_found("Document not found"))?;

    Ok(Json(DocumentEnvelope {
        document: document.to_view(),
    }))
}

/// `PUT /document/{id}`
///
/// Existence is checked before the body, so an unknown id is a 404 even when
/// the body is incomplete.
pub async fn update_document(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<UpdateDocumentRequest>, JsonRejection>,
) -> BackendResult<Json<UpdateDocumentResponse>> {
    let id = parse_document_id(&raw_id)?;
    if db::get_document(&state.db_pool, id).await?.is_none() {
        return Err(BackendError::not_found("Document not found"));
    }

    let Json(request) = payload?;
    let title = required_text("title", request.title)?;
    let content = required_text("content", request.content)?;

    let expected_version = request.version;
    let writer = state.clone();
    let version = run_detached(async move {
        let key = document_key(id);
        let _guard = writer.cache_locks.lock(&key).await;

        let result =
            db::update_document(&writer.db_pool, id, &title, &content, expected_version).await;
        // Dropped on failure too: a conflict means the cached copy is behind.
        writer.document_cache.invalidate(&key).await;

        let version = result?;
        mirror_body(&writer, id, &content).await;
        Ok::<_, BackendError>(version)
    })
    .await?;

    tracing::info!("Updated document {} to version {}", id, version);

    Ok(Json(UpdateDocumentResponse {
        message: "Document updated successfully".to_string(),
        version,
    }))
}

/// `POST /document/share`
///
/// Neither the document nor the recipient is looked up; any pair of integer
/// ids is accepted.
pub async fn share_document(
    State(pool): State<SqlitePool>,
    payload: Result<Json<ShareDocumentRequest>, JsonRejection>,
) -> BackendResult<(StatusCode, Json<ShareDocumentResponse>)> {
    let Json(request) = payload?;
    let document_id = required_id("document_id", request.document_id)?;
    let user_id = required_id("user_id", request.user_id)?;

    let share_id = db::share_document(&pool, document_id, user_id).await?;
    tracing::info!("Shared document {} with user {}", document_id, user_id);

    Ok((
        StatusCode::CREATED,
        Json(ShareDocumentResponse {
            message: "Document shared successfully".to_string(),
            share_id,
        }),
    ))
}

/// `GET /document/{id}/shares`
pub async fn list_shares(
    State(pool): State<SqlitePool>,
    Path(raw_id): Path<String>,
) -> BackendResult<Json<ListSharesResponse>> {
    let id = parse_document_id(&raw_id)?;
    let shares = db::list_shares_for_document(&pool, id).await?;

    Ok(Json(ListSharesResponse {
        shares: shares.into_iter().map(Into::into).collect(),
    }))
}
