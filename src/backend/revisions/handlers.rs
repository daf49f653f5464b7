//! Versioned Document HTTP Handlers
//!
//! - `POST /documents` - create an empty document
//! - `GET /documents/{id}` - document with its versions and collaborators
//! - `POST /documents/{id}` - upload a version (multipart field `document`)
//! - `GET /documents/{id}/versions/{version_id}` - download a version
//! - `POST /documents/{id}/collaborate` - overwrite the content field
//!
//! Uploads for one document are serialized by a per-document lock so version
//! ids are handed out strictly in sequence. Cache fills of `stored:{id}` and
//! the writes that invalidate it are exclusive through the cache lock of
//! that key, and writes run detached so a dropped request cannot skip the
//! invalidation.

use std::path::Path as FsPath;

use axum::{
    extract::{
        multipart::{Multipart, MultipartRejection},
        rejection::JsonRejection,
        Path, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use uuid::Uuid;

use crate::backend::cache::keys::{stored_document_key, version_key, version_prefix};
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::server::run_detached;
use crate::backend::server::state::AppState;
use crate::backend::storage::sanitize_filename;
use crate::shared::{DocumentEnvelope, MessageResponse, StoredDocumentView};
use super::db::{self, NewVersion, VersionEntry};
use super::types::{CollaborateRequest, CreateStoredDocumentResponse, UploadVersionResponse};

/// Name of the multipart field carrying the file
pub const DOCUMENT_FIELD: &str = "document";

/// Normalize a path id; anything that is not a UUID names no document
fn parse_document_id(raw: &str) -> BackendResult<String> {
    Uuid::parse_str(raw)
        .map(|id| id.to_string())
        .map_err(|_| BackendError::not_found("Document not found"))
}

/// The file part of an upload
struct UploadedFile {
    filename: String,
    bytes: Bytes,
}

/// Pull the `document` part out of a multipart body
async fn read_document_part(multipart: &mut Multipart) -> BackendResult<UploadedFile> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(DOCUMENT_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        if filename.trim().is_empty() {
            return Err(BackendError::handler(StatusCode::BAD_REQUEST, "No selected file"));
        }

        let bytes = field.bytes().await?;
        return Ok(UploadedFile { filename, bytes });
    }

    Err(BackendError::handler(StatusCode::BAD_REQUEST, "No document part"))
}

/// `POST /documents`
pub async fn create_stored_document(
    State(state): State<AppState>,
) -> BackendResult<(StatusCode, Json<CreateStoredDocumentResponse>)> {
    let doc_id = db::create_stored_document(&state.db_pool).await?;
    tracing::info!("Created versioned document {}", doc_id);

    Ok((
        StatusCode::CREATED,
        Json(CreateStoredDocumentResponse {
            message: "Document created".to_string(),
            doc_id,
        }),
    ))
}

/// `GET /documents/{id}`
pub async fn get_stored_document(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> BackendResult<Json<DocumentEnvelope<StoredDocumentView>>> {
    let document_id = parse_document_id(&raw_id)?;
    let key = stored_document_key(&document_id);

    let document = match state.stored_cache.get(&key).await {
        Some(document) => document,
        None => {
            let _guard = state.cache_locks.lock(&key).await;
            match state.stored_cache.get(&key).await {
                Some(document) => document,
                None => {
                    let document = db::get_stored_document(&state.db_pool, &document_id)
                        .await?
                        .ok_or_else(|| BackendError::not_found("Document not found"))?;
                    state.stored_cache.insert(key, document.clone()).await;
                    document
                }
            }
        }
    };

    Ok(Json(DocumentEnvelope {
        document: document.to_view(),
    }))
}

/// `POST /documents/{id}`
///
/// Saves the file, then records the version entry. If recording fails the
/// file is removed again.
pub async fn upload_version(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> BackendResult<(StatusCode, Json<UploadVersionResponse>)> {
    let mut multipart = multipart.map_err(|rejection| {
        BackendError::handler(rejection.status(), rejection.body_text())
    })?;
    let upload = read_document_part(&mut multipart).await?;
    let document_id = parse_document_id(&raw_id)?;

    let size = upload.bytes.len();
    let version_id = run_detached(store_version(state, document_id.clone(), upload)).await?;

    tracing::info!(
        "Stored version {} of document {} ({} bytes)",
        version_id,
        document_id,
        size
    );

    Ok((
        StatusCode::CREATED,
        Json(UploadVersionResponse {
            message: "Document version uploaded successfully".to_string(),
            version_id,
        }),
    ))
}

/// Save the file and record the entry; returns the new version id
async fn store_version(
    state: AppState,
    document_id: String,
    upload: UploadedFile,
) -> BackendResult<String> {
    let _upload_guard = state.upload_locks.lock(&document_id).await;

    if !db::stored_document_exists(&state.db_pool, &document_id).await? {
        return Err(BackendError::not_found("Document not found"));
    }

    let seq = db::next_version_seq(&state.db_pool, &document_id).await?;
    let version_id = seq.to_string();
    let relative = state
        .uploads
        .version_path(&document_id, &version_id, &upload.filename);
    let filename = sanitize_filename(&upload.filename);

    let saved = state.uploads.save(&relative, &upload.bytes).await?;
    let relative_str = relative.to_string_lossy().to_string();

    let key = stored_document_key(&document_id);
    let _cache_guard = state.cache_locks.lock(&key).await;

    let appended = db::append_version(
        &state.db_pool,
        NewVersion {
            document_id: &document_id,
            seq,
            version_id: &version_id,
            path: &relative_str,
            filename: &filename,
            size: upload.bytes.len() as i64,
        },
    )
    .await;

    state.stored_cache.invalidate(&key).await;
    // Version entries never change once appended and misses are not cached,
    // so this key space needs no cache lock.
    state
        .version_cache
        .invalidate_prefix(&version_prefix(&document_id))
        .await;

    if let Err(e) = appended {
        if let Err(cleanup) = state.uploads.delete_if_exists(&saved).await {
            tracing::warn!("Failed to remove orphaned upload {}: {}", saved.display(), cleanup.message());
        }
        return Err(e);
    }

    Ok(version_id)
}

/// `GET /documents/{id}/versions/{version_id}`
///
/// Responds with the raw bytes as an attachment; JSON only on failure.
pub async fn download_version(
    State(state): State<AppState>,
    Path((raw_id, version_id)): Path<(String, String)>,
) -> BackendResult<Response> {
    let document_id = parse_document_id(&raw_id)
        .map_err(|_| BackendError::not_found("Document or version not found"))?;
    let key = version_key(&document_id, &version_id);

    let entry: VersionEntry = match state.version_cache.get(&key).await {
        Some(entry) => entry,
        None => {
            let entry = db::find_version(&state.db_pool, &document_id, &version_id)
                .await?
                .ok_or_else(|| BackendError::not_found("Document or version not found"))?;
            state.version_cache.insert(key, entry.clone()).await;
            entry
        }
    };

    let bytes = state.uploads.read(FsPath::new(&entry.path)).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/octet-stream".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", entry.filename),
            ),
        ],
        bytes,
    )
        .into_response())
}

/// `POST /documents/{id}/collaborate`
pub async fn collaborate(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<CollaborateRequest>, JsonRejection>,
) -> BackendResult<Json<MessageResponse>> {
    let document_id = parse_document_id(&raw_id)?;
    let Json(request) = payload?;

    let writer = state.clone();
    let target = document_id.clone();
    run_detached(async move {
        let key = stored_document_key(&target);
        let _guard = writer.cache_locks.lock(&key).await;

        let result = db::collaborate(&writer.db_pool, &target, &request.content, request.user_id).await;
        writer.stored_cache.invalidate(&key).await;
        result
    })
    .await?;

    tracing::info!("Content of document {} overwritten", document_id);

    Ok(Json(MessageResponse::new("Document updated in real-time")))
}
