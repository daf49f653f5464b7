/**
 * Registration Handler
 *
 * Implements `POST /user`.
 *
 * # Registration Process
 *
 * 1. Require `username` and `password`
 * 2. Reject a username that is already taken
 * 3. Hash the password with bcrypt (on the blocking pool)
 * 4. Insert the user
 *
 * # Errors
 *
 * * `400 Bad Request` - missing or blank field, malformed JSON
 * * `409 Conflict` - username already taken
 * * `500 Internal Server Error` - hashing or database failure
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use bcrypt::{hash, DEFAULT_COST};
use sqlx::SqlitePool;

use crate::backend::auth::handlers::types::{RegisterRequest, RegisterResponse};
use crate::backend::auth::users::{create_user, get_user_by_username};
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::validation::required_text;

/// Register handler
///
/// # Example Request
///
/// ```http
/// POST /user HTTP/1.1
/// Content-Type: application/json
///
/// { "username": "alice", "password": "correct horse" }
/// ```
///
/// # Example Response (201)
///
/// ```json
/// { "message": "User registered successfully", "user_id": 1, "public_id": "..." }
/// ```
pub async fn register_user(
    State(pool): State<SqlitePool>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> BackendResult<(StatusCode, Json<RegisterResponse>)> {
    let Json(request) = payload?;
    let username = required_text("username", request.username)?;
    let password = required_text("password", request.password)?;

    tracing::info!("Registration request for username: {}", username);

    if get_user_by_username(&pool, &username).await?.is_some() {
        tracing::warn!("Username already exists: {}", username);
        return Err(BackendError::conflict("Username already taken"));
    }

    let password_hash = tokio::task::spawn_blocking(move || hash(password, DEFAULT_COST))
        .await
        .map_err(|e| {
            tracing::error!("Password hashing task failed: {:?}", e);
            BackendError::handler(StatusCode::INTERNAL_SERVER_ERROR, "Server error")
        })?
        .map_err(|e| {
            tracing::error!("Failed to hash password: {:?}", e);
            BackendError::handler(StatusCode::INTERNAL_SERVER_ERROR, "Server error")
        })?;

    let user = create_user(&pool, &username, &password_hash)
        .await
        .map_err(|e| {
            let taken = e
                .as_database_error()
                .map(|db| db.is_unique_violation())
                .unwrap_or(false);
            if taken {
                // Lost a race with a concurrent registration.
                BackendError::conflict("Username already taken")
            } else {
                BackendError::from(e)
            }
        })?;

    tracing::info!("User registered: {} (id {})", user.username, user.id);

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            user_id: user.id,
            public_id: user.public_id,
        }),
    ))
}
