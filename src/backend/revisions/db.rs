//! Database operations for versioned documents
//!
//! A versioned document is one row in `stored_documents`, an append-only list
//! in `document_versions` and a collaborator set in `document_collaborators`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::error::{BackendError, BackendResult};
use crate::shared::{StoredDocumentView, VersionSummary};

/// One uploaded revision
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct VersionEntry {
    pub document_id: String,
    /// Per-document sequence number, starting at 1
    pub seq: i64,
    pub version_id: String,
    /// Path relative to the upload directory
    pub path: String,
    pub filename: String,
    pub size: i64,
    pub created_at: DateTime<Utc>,
}

impl VersionEntry {
    pub fn to_summary(&self) -> VersionSummary {
        VersionSummary {
            version_id: self.version_id.clone(),
            filename: self.filename.clone(),
            size: self.size,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
struct StoredDocumentRow {
    id: String,
    content: String,
    created_at: DateTime<Utc>,
}

/// A versioned document with its versions and collaborators
#[derive(Debug, Clone)]
pub struct StoredDocument {
    pub id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// Oldest first
    pub versions: Vec<VersionEntry>,
    pub collaborators: Vec<i64>,
}

impl StoredDocument {
    pub fn to_view(&self) -> StoredDocumentView {
        StoredDocumentView {
            id: self.id.clone(),
            content: self.content.clone(),
            created_at: self.created_at,
            versions: self.versions.iter().map(VersionEntry::to_summary).collect(),
            collaborators: self.collaborators.clone(),
        }
    }
}

/// A version entry about to be appended
#[derive(Debug, Clone)]
pub struct NewVersion<'a> {
    pub document_id: &'a str,
    pub seq: i64,
    pub version_id: &'a str,
    pub path: &'a str,
    pub filename: &'a str,
    pub size: i64,
}

/// Create an empty document: no content, no versions, no collaborators
pub async fn create_stored_document(pool: &SqlitePool) -> Result<String, sqlx::Error> {
    let id = Uuid::new_v4().to_string();

    sqlx::query(
        r#"
        INSERT INTO stored_documents (id, content, created_at)
        VALUES (?, '', ?)
        "#
    )
    .bind(&id)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(id)
}

pub async fn stored_document_exists(pool: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
    let found = sqlx::query_scalar::<_, i64>("SELECT 1 FROM stored_documents WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(found.is_some())
}

/// Get a document together with its versions and collaborators
pub async fn get_stored_document(
    pool: &SqlitePool,
    id: &str,
) -> Result<Option<StoredDocument>, sqlx::Error> {
    let row = sqlx::query_as::<_, StoredDocumentRow>(
        "SELECT id, content, created_at FROM stored_documents WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let versions = sqlx::query_as::<_, VersionEntry>(
        r#"
        SELECT document_id, seq, version_id, path, filename, size, created_at
        FROM document_versions
        WHERE document_id = ?
        ORDER BY seq
        "#
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    let collaborators = sqlx::query_scalar::<_, i64>(
        "SELECT user_id FROM document_collaborators WHERE document_id = ? ORDER BY user_id",
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    Ok(Some(StoredDocument {
        id: row.id,
        content: row.content,
        created_at: row.created_at,
        versions,
        collaborators,
    }))
}

/// Next free sequence number for a document
///
/// Callers hold the document's upload lock between this call and
/// `append_version`.
pub async fn next_version_seq(pool: &SqlitePool, document_id: &str) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COALESCE(MAX(seq), 0) + 1 FROM document_versions WHERE document_id = ?",
    )
    .bind(document_id)
    .fetch_one(pool)
    .await
}

/// Append a version entry
///
/// Strict: the document must already exist, nothing is created on the fly.
/// Existing entries are never touched.
pub async fn append_version(pool: &SqlitePool, version: NewVersion<'_>) -> BackendResult<VersionEntry> {
    let created_at = Utc::now();

    let result = sqlx::query(
        r#"
        INSERT INTO document_versions (document_id, seq, version_id, path, filename, size, created_at)
        SELECT ?, ?, ?, ?, ?, ?, ?
        WHERE EXISTS (SELECT 1 FROM stored_documents WHERE id = ?)
        "#
    )
    .bind(version.document_id)
    .bind(version.seq)
    .bind(version.version_id)
    .bind(version.path)
    .bind(version.filename)
    .bind(version.size)
    .bind(created_at)
    .bind(version.document_id)
    .execute(pool)
    .await
    .map_err(|e| {
        let duplicate = e
            .as_database_error()
            .map(|db| db.is_unique_violation())
            .unwrap_or(false);
        if duplicate {
            BackendError::conflict(format!("Version {} already exists", version.version_id))
        } else {
            BackendError::from(e)
        }
    })?;

    if result.rows_affected() == 0 {
        return Err(BackendError::not_found("Document not found"));
    }

    Ok(VersionEntry {
        document_id: version.document_id.to_string(),
        seq: version.seq,
        version_id: version.version_id.to_string(),
        path: version.path.to_string(),
        filename: version.filename.to_string(),
        size: version.size,
        created_at,
    })
}

/// Find one version of a document
pub async fn find_version(
    pool: &SqlitePool,
    document_id: &str,
    version_id: &str,
) -> Result<Option<VersionEntry>, sqlx::Error> {
    sqlx::query_as::<_, VersionEntry>(
        r#"
        SELECT document_id, seq, version_id, path, filename, size, created_at
        FROM document_versions
        WHERE document_id = ? AND version_id = ?
        "#
    )
    .bind(document_id)
    .bind(version_id)
    .fetch_optional(pool)
    .await
}

/// Overwrite the content field and optionally add a collaborator
///
/// Last writer wins; there is no merge.
pub async fn collaborate(
    pool: &SqlitePool,
    document_id: &str,
    content: &str,
    collaborator: Option<i64>,
) -> BackendResult<()> {
    let mut tx = pool.begin().await?;

    let updated = sqlx::query("UPDATE stored_documents SET content = ? WHERE id = ?")
        .bind(content)
        .bind(document_id)
        .execute(&mut *tx)
        .await?;

    if updated.rows_affected() == 0 {
        tx.rollback().await?;
        return Err(BackendError::not_found("Document not found"));
    }

    if let Some(user_id) = collaborator {
        sqlx::query(
            "INSERT OR IGNORE INTO document_collaborators (document_id, user_id) VALUES (?, ?)",
        )
        .bind(document_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(())
}
