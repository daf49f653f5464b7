/**
 * Versioned Document Handler Types
 */

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CreateStoredDocumentResponse {
    pub message: String,
    pub doc_id: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UploadVersionResponse {
    pub message: String,
    pub version_id: String,
}

/// `POST /documents/{id}/collaborate`
///
/// A missing `content` overwrites with the empty string.
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct CollaborateRequest {
    #[serde(default)]
    pub content: String,
    /// Added to the collaborator set when present
    pub user_id: Option<i64>,
}
