/**
 * File Storage
 *
 * Deterministic on-disk layout for document data, rooted at a configured base
 * directory.
 *
 * # Layout
 *
 * ```text
 * <base>/<document_id>.txt                          mirrored document body
 * <base>/<document_id>/<version_id>_<filename>      uploaded version
 * ```
 *
 * Version paths are handed out relative to the base so they can be stored in
 * the database and resolved again after the base moves.
 *
 * # Atomicity
 *
 * `save` and `write_text` write into a temp file next to the destination and
 * rename it into place, so a concurrent reader sees either the old file or the
 * complete new one. Directory creation is idempotent.
 */

use std::path::{Component, Path, PathBuf};

use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::backend::error::{BackendError, BackendResult};

/// Extension used for mirrored document bodies
pub const DOCUMENT_EXTENSION: &str = "txt";

/// File store rooted at a base directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    base_dir: PathBuf,
}

impl FileStorage {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Create the base directory if it does not exist yet
    pub async fn ensure_base_dir(&self) -> BackendResult<()> {
        fs::create_dir_all(&self.base_dir).await.map_err(|e| {
            BackendError::storage(format!(
                "Failed to create storage directory {}: {}",
                self.base_dir.display(),
                e
            ))
        })
    }

    /// Absolute path of the mirrored body for a document
    pub fn document_path(&self, document_id: impl std::fmt::Display) -> PathBuf {
        self.base_dir
            .join(format!("{}.{}", document_id, DOCUMENT_EXTENSION))
    }

    /// Relative path for one uploaded version
    pub fn version_path(&self, document_id: &str, version_id: &str, filename: &str) -> PathBuf {
        PathBuf::from(document_id).join(format!("{}_{}", version_id, sanitize_filename(filename)))
    }

    /// Resolve a relative path against the base directory
    ///
    /// Rejects anything that could escape the base (absolute paths, `..`).
    pub fn resolve(&self, relative: &Path) -> BackendResult<PathBuf> {
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes || relative.as_os_str().is_empty() {
            return Err(BackendError::storage(format!(
                "Refusing path outside storage root: {}",
                relative.display()
            )));
        }
        Ok(self.base_dir.join(relative))
    }

    /// Save bytes at a path relative to the base
    pub async fn save(&self, relative: &Path, bytes: &[u8]) -> BackendResult<PathBuf> {
        let destination = self.resolve(relative)?;
        write_atomic(&destination, bytes).await?;
        tracing::debug!("Saved {} bytes to {}", bytes.len(), destination.display());
        Ok(destination)
    }

    /// Read a file at a path relative to the base
    ///
    /// A missing file is `NotFound`.
    pub async fn read(&self, relative: &Path) -> BackendResult<Vec<u8>> {
        let path = self.resolve(relative)?;
        match fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(BackendError::not_found("Stored file not found"))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Write text to an absolute path, creating parent directories
    pub async fn write_text(&self, path: &Path, text: &str) -> BackendResult<()> {
        write_atomic(path, text.as_bytes()).await
    }

    /// Move a file, creating the destination directory first
    pub async fn move_file(&self, source: &Path, destination: &Path) -> BackendResult<()> {
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::rename(source, destination).await.map_err(|e| {
            BackendError::storage(format!(
                "Failed to move {} to {}: {}",
                source.display(),
                destination.display(),
                e
            ))
        })
    }

    pub async fn exists(&self, path: &Path) -> bool {
        fs::try_exists(path).await.unwrap_or(false)
    }

    /// Delete a file. Returns false if there was nothing to delete.
    pub async fn delete_if_exists(&self, path: &Path) -> BackendResult<bool> {
        match fs::remove_file(path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

async fn write_atomic(destination: &Path, bytes: &[u8]) -> BackendResult<()> {
    let parent = destination
        .parent()
        .ok_or_else(|| BackendError::storage("Destination has no parent directory"))?;
    fs::create_dir_all(parent).await?;

    let temp = parent.join(format!(".tmp-{}", Uuid::new_v4()));
    let result = async {
        let mut file = fs::File::create(&temp).await?;
        file.write_all(bytes).await?;
        file.sync_all().await?;
        fs::rename(&temp, destination).await
    }
    .await;

    if let Err(e) = result {
        let _ = fs::remove_file(&temp).await;
        return Err(BackendError::storage(format!(
            "Failed to write {}: {}",
            destination.display(),
            e
        )));
    }
    Ok(())
}

/// Reduce an uploaded filename to a safe single path segment
///
/// Keeps ASCII alphanumerics, `.`, `-` and `_`; whitespace becomes `_`; any
/// directory part is dropped; leading dots are stripped. Falls back to
/// `upload` when nothing is left.
pub fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(name);

    let cleaned: String = base
        .chars()
        .filter_map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                Some(c)
            } else if c.is_whitespace() {
                Some('_')
            } else {
                None
            }
        })
        .collect();

    let cleaned = cleaned.trim_start_matches('.').trim_matches('_');
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned.to_string()
    }
}
