use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::error::{is_unique_violation, ApiError, ApiResult};

/// User record in the database.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // Argon2 hash, not exposed in JSON
}

impl User {
    /// Find a user by username.
    pub async fn find_by_username(db: &PgPool, username: &str) -> ApiResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Insert a new user in one statement; a duplicate username surfaces as
    /// `Conflict` no matter how the insert raced.
    pub async fn create(db: &PgPool, username: &str, password_hash: &str) -> ApiResult<i64> {
        let user_id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::Conflict("User already exists")
            } else {
                ApiError::from(e)
            }
        })?;
        Ok(user_id)
    }
}
