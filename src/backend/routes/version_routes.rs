/**
 * Versioned Document Routes
 *
 * - `POST /documents` - create an empty document
 * - `GET /documents/{id}` - document, versions and collaborators
 * - `POST /documents/{id}` - upload a version (multipart)
 * - `GET /documents/{id}/versions/{version_id}` - download a version
 * - `POST /documents/{id}/collaborate` - overwrite content
 */

use axum::{
    routing::{get, post},
    Router,
};

use crate::backend::revisions::handlers::{
    collaborate, create_stored_document, download_version, get_stored_document, upload_version,
};
use crate::backend::server::state::AppState;

pub fn configure_version_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/documents", post(create_stored_document))
        .route(
            "/documents/{id}",
            get(get_stored_document).post(upload_version),
        )
        .route("/documents/{id}/versions/{version_id}", get(download_version))
        .route("/documents/{id}/collaborate", post(collaborate))
}
