//! Cache key construction
//!
//! Every cached read and every invalidating write builds its key here so the
//! two sides cannot drift apart.

/// Key for a relational document read
pub fn document_key(document_id: i64) -> String {
    format!("document:{}", document_id)
}

/// Key for a versioned document read
pub fn stored_document_key(document_id: &str) -> String {
    format!("stored:{}", document_id)
}

/// Key for a single version entry lookup
pub fn version_key(document_id: &str, version_id: &str) -> String {
    format!("{}{}", version_prefix(document_id), version_id)
}

/// Prefix shared by all version keys of one document
pub fn version_prefix(document_id: &str) -> String {
    format!("version:{}:", document_id)
}
