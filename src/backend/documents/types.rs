/**
 * Document Handler Types
 *
 * Request and response bodies for the `/document` endpoints.
 */

use serde::{Deserialize, Serialize};

use crate::shared::ShareView;

/// `POST /document`
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct CreateDocumentRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub user_id: Option<i64>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CreateDocumentResponse {
    pub message: String,
    pub document_id: i64,
}

/// `PUT /document/{id}`
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct UpdateDocumentRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    /// When present, the update only applies if the document is still at
    /// this version.
    pub version: Option<i64>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UpdateDocumentResponse {
    pub message: String,
    pub version: i64,
}

/// `POST /document/share`
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct ShareDocumentRequest {
    pub document_id: Option<i64>,
    pub user_id: Option<i64>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ShareDocumentResponse {
    pub message: String,
    pub share_id: i64,
}

/// `GET /document/{id}/shares`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ListSharesResponse {
    pub shares: Vec<ShareView>,
}
