/**
 * API Routes
 *
 * - `POST /user` - register a user
 * - `POST /document` - create a relational document
 * - `GET /document/{id}` / `PUT /document/{id}` - read / update
 * - `POST /document/share` - share a document with a user
 * - `GET /document/{id}/shares` - list shares of a document
 * - `GET /versions/compare` - compare two version strings
 * - `GET /health` - liveness check
 */

use axum::{
    routing::{get, post},
    Router,
};

use crate::backend::auth::register_user;
use crate::backend::documents::handlers::{
    create_document, get_document, list_shares, share_document, update_document,
};
use crate::backend::server::state::AppState;
use crate::backend::system::{compare_versions_handler, health};

/// Add the user, relational document and utility routes
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/user", post(register_user))
        .route("/document", post(create_document))
        // Static segment wins over `{id}` in axum's matcher.
        .route("/document/share", post(share_document))
        .route("/document/{id}", get(get_document).put(update_document))
        .route("/document/{id}/shares", get(list_shares))
        .route("/versions/compare", get(compare_versions_handler))
        .route("/health", get(health))
}
