//! Database operations for relational documents and share records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::backend::error::{BackendError, BackendResult};
use crate::shared::{DocumentView, ShareView};

/// A row of the `documents` table
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct DocumentRecord {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub version_number: i64,
    pub created_at: DateTime<Utc>,
    pub author_id: i64,
}

impl DocumentRecord {
    pub fn to_view(&self) -> DocumentView {
        DocumentView {
            title: self.title.clone(),
            body: self.body.clone(),
            version: self.version_number,
        }
    }
}

/// A row of the `shared_documents` table
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ShareRecord {
    pub id: i64,
    pub document_id: i64,
    pub user_id: i64,
}

impl From<ShareRecord> for ShareView {
    fn from(record: ShareRecord) -> Self {
        ShareView {
            id: record.id,
            document_id: record.document_id,
            user_id: record.user_id,
        }
    }
}

fn validate_content(title: &str, body: &str) -> BackendResult<()> {
    if title.trim().is_empty() {
        return Err(BackendError::validation("title", "title must not be empty"));
    }
    if body.trim().is_empty() {
        return Err(BackendError::validation("content", "content must not be empty"));
    }
    Ok(())
}

/// Create a document at version 1
///
/// The owner id is stored as given; it is not checked against `users`.
pub async fn create_document(
    pool: &SqlitePool,
    owner_id: i64,
    title: &str,
    body: &str,
) -> BackendResult<i64> {
    validate_content(title, body)?;

    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO documents (title, body, version_number, created_at, author_id)
        VALUES (?, ?, 1, ?, ?)
        RETURNING id
        "#
    )
    .bind(title)
    .bind(body)
    .bind(Utc::now())
    .bind(owner_id)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Get a document by id
pub async fn get_document(
    pool: &SqlitePool,
    id: i64,
) -> Result<Option<DocumentRecord>, sqlx::Error> {
    sqlx::query_as::<_, DocumentRecord>(
        r#"
        SELECT id, title, body, version_number, created_at, author_id
        FROM documents
        WHERE id = ?
        "#
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Replace title and body and bump the version counter
///
/// The increment happens inside the UPDATE statement, so concurrent updates
/// never read the same counter. With `expected_version` the update only
/// applies when the stored counter still matches, otherwise `Conflict`.
///
/// # Returns
/// The new version number.
pub async fn update_document(
    pool: &SqlitePool,
    id: i64,
    title: &str,
    body: &str,
    expected_version: Option<i64>,
) -> BackendResult<i64> {
    validate_content(title, body)?;

    let mut tx = pool.begin().await?;

    let updated = sqlx::query_scalar::<_, i64>(
        r#"
        UPDATE documents
        SET title = ?, body = ?, version_number = version_number + 1
        WHERE id = ? AND (? IS NULL OR version_number = ?)
        RETURNING version_number
        "#
    )
    .bind(title)
    .bind(body)
    .bind(id)
    .bind(expected_version)
    .bind(expected_version)
    .fetch_optional(&mut *tx)
    .await?;

    if let Some(version) = updated {
        tx.commit().await?;
        return Ok(version);
    }

    let current = sqlx::query_scalar::<_, i64>("SELECT version_number FROM documents WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
    tx.rollback().await?;

    match (current, expected_version) {
        (None, _) => Err(BackendError::not_found("Document not found")),
        (Some(current), Some(expected)) => Err(BackendError::conflict(format!(
            "Document is at version {}, expected {}",
            current, expected
        ))),
        // Unreachable without a version guard: the row exists, so the UPDATE matched.
        (Some(_), None) => Err(BackendError::conflict("Document changed during update")),
    }
}

/// Record that a document is shared with a user
///
/// Neither id is checked for existence and duplicates are kept.
pub async fn share_document(
    pool: &SqlitePool,
    document_id: i64,
    recipient_id: i64,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO shared_documents (target_doc_id, recipient_user_id)
        VALUES (?, ?)
        RETURNING id
        "#
    )
    .bind(document_id)
    .bind(recipient_id)
    .fetch_one(pool)
    .await
}

/// List share records for a document, oldest first
pub async fn list_shares_for_document(
    pool: &SqlitePool,
    document_id: i64,
) -> Result<Vec<ShareRecord>, sqlx::Error> {
    sqlx::query_as::<_, ShareRecord>(
        r#"
        SELECT id, target_doc_id AS document_id, recipient_user_id AS user_id
        FROM shared_documents
        WHERE target_doc_id = ?
        ORDER BY id
        "#
    )
    .bind(document_id)
    .fetch_all(pool)
    .await
}
