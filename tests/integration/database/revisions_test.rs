//! Version lineage at the store level

use assert_matches::assert_matches;

use docvault::backend::revisions::db::{
    append_version, create_stored_document, find_version, get_stored_document, NewVersion,
};
use docvault::backend::BackendError;

use crate::common::test_pool;

fn version<'a>(document_id: &'a str, seq: i64, version_id: &'a str) -> NewVersion<'a> {
    NewVersion {
        document_id,
        seq,
        version_id,
        path: "unused",
        filename: "file.txt",
        size: 0,
    }
}

#[tokio::test]
async fn test_append_requires_existing_document() {
    let dir = tempfile::tempdir().unwrap();
    let pool = test_pool(dir.path()).await;

    let result = append_version(&pool, version("missing", 1, "1")).await;
    assert_matches!(result, Err(BackendError::NotFound { .. }));
}

#[tokio::test]
async fn test_append_rejects_duplicate_version_id() {
    let dir = tempfile::tempdir().unwrap();
    let pool = test_pool(dir.path()).await;
    let id = create_stored_document(&pool).await.unwrap();

    append_version(&pool, version(&id, 1, "1")).await.unwrap();
    let result = append_version(&pool, version(&id, 2, "1")).await;
    assert_matches!(result, Err(BackendError::Conflict { .. }));
}

#[tokio::test]
async fn test_appended_entries_keep_their_order() {
    let dir = tempfile::tempdir().unwrap();
    let pool = test_pool(dir.path()).await;
    let id = create_stored_document(&pool).await.unwrap();

    for seq in 1..=3 {
        let version_id = seq.to_string();
        append_version(&pool, version(&id, seq, &version_id)).await.unwrap();
    }

    let document = get_stored_document(&pool, &id).await.unwrap().unwrap();
    let seqs: Vec<i64> = document.versions.iter().map(|v| v.seq).collect();
    assert_eq!(seqs, vec![1, 2, 3]);

    assert!(find_version(&pool, &id, "2").await.unwrap().is_some());
    assert!(find_version(&pool, &id, "4").await.unwrap().is_none());
}
