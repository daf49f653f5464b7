/**
 * User Model and Database Operations
 *
 * Users are created once at registration and never mutated afterwards.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// User struct representing a row of the `users` table
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Internal numeric id, referenced by documents and shares
    pub id: i64,
    /// Opaque public id (UUID v4)
    pub public_id: String,
    /// Username (unique)
    pub username: String,
    /// Hashed password (bcrypt)
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
}

/// Create a new user
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `username` - User's chosen username
/// * `password_hash` - Hashed password
///
/// # Returns
/// Created user or error. A taken username surfaces as a unique violation.
pub async fn create_user(
    pool: &SqlitePool,
    username: &str,
    password_hash: &str,
) -> Result<User, sqlx::Error> {
    let public_id = uuid::Uuid::new_v4().to_string();
    let now = Utc::now();

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (public_id, username, password_hash, created_at)
        VALUES (?, ?, ?, ?)
        RETURNING id, public_id, username, password_hash, created_at
        "#
    )
    .bind(&public_id)
    .bind(username)
    .bind(password_hash)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Get user by username
pub async fn get_user_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, public_id, username, password_hash, created_at
        FROM users
        WHERE username = ?
        "#
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}
