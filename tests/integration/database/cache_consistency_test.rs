//! Cache fills racing writes
//!
//! Each trial starts from a cold cache and runs several readers alongside one
//! writer. Once the writer has returned, the next read must show its result.

use axum::extract::{Path, State};
use axum::Json;

use docvault::backend::documents::db as document_db;
use docvault::backend::documents::handlers::{get_document, update_document};
use docvault::backend::documents::types::UpdateDocumentRequest;
use docvault::backend::revisions::db as revision_db;
use docvault::backend::revisions::handlers::{collaborate, get_stored_document};
use docvault::backend::revisions::types::CollaborateRequest;
use docvault::backend::server::{build_state, AppState};

use crate::common::test_config;

const TRIALS: usize = 300;
const READERS: usize = 8;

async fn fresh_state(dir: &std::path::Path) -> AppState {
    build_state(test_config(dir))
        .await
        .expect("Failed to build state")
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_document_reads_racing_an_update_are_never_stale_afterwards() {
    let dir = tempfile::tempdir().unwrap();
    let state = fresh_state(dir.path()).await;

    for trial in 0..TRIALS {
        let id = document_db::create_document(&state.db_pool, 1, "Race", "before")
            .await
            .unwrap();

        let readers: Vec<_> = (0..READERS)
            .map(|_| {
                let state = state.clone();
                tokio::spawn(async move {
                    get_document(State(state), Path(id.to_string())).await.map(|_| ())
                })
            })
            .collect();

        let writer = {
            let state = state.clone();
            tokio::spawn(async move {
                let request = UpdateDocumentRequest {
                    title: Some("Race".to_string()),
                    content: Some("after".to_string()),
                    version: None,
                };
                update_document(State(state), Path(id.to_string()), Ok(Json(request)))
                    .await
                    .map(|Json(response)| response.version)
            })
        };

        assert_eq!(writer.await.unwrap().unwrap(), 2);
        for reader in readers {
            reader.await.unwrap().unwrap();
        }

        let Json(envelope) = get_document(State(state.clone()), Path(id.to_string()))
            .await
            .unwrap();
        assert_eq!(envelope.document.version, 2, "stale version in trial {trial}");
        assert_eq!(envelope.document.body, "after", "stale body in trial {trial}");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_stored_reads_racing_collaborate_are_never_stale_afterwards() {
    let dir = tempfile::tempdir().unwrap();
    let state = fresh_state(dir.path()).await;

    for trial in 0..TRIALS {
        let id = revision_db::create_stored_document(&state.db_pool).await.unwrap();

        let readers: Vec<_> = (0..READERS)
            .map(|_| {
                let state = state.clone();
                let id = id.clone();
                tokio::spawn(async move {
                    get_stored_document(State(state), Path(id)).await.map(|_| ())
                })
            })
            .collect();

        let writer = {
            let state = state.clone();
            let id = id.clone();
            tokio::spawn(async move {
                let request = CollaborateRequest {
                    content: format!("trial {trial}"),
                    user_id: Some(9),
                };
                collaborate(State(state), Path(id), Ok(Json(request)))
                    .await
                    .map(|_| ())
            })
        };

        writer.await.unwrap().unwrap();
        for reader in readers {
            reader.await.unwrap().unwrap();
        }

        let Json(envelope) = get_stored_document(State(state.clone()), Path(id))
            .await
            .unwrap();
        assert_eq!(envelope.document.content, format!("trial {trial}"));
        assert_eq!(envelope.document.collaborators, vec![9]);
    }
}
