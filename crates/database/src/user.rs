//! User operations.

use sqlx::SqlitePool;
use tracing::info;

use crate::error::{DatabaseError, Result};
use crate::models::{NewUser, User};

/// Record an interaction from a user.
///
/// Creates the user on first contact. Afterwards only `last_seen` and
/// `username` are refreshed; names are kept as first seen.
pub async fn upsert_user(pool: &SqlitePool, user: &NewUser) -> Result<User> {
    sqlx::query(
        r#"
        INSERT INTO users (user_id, username, first_name, last_name, last_seen)
        VALUES (?, ?, ?, ?, datetime('now'))
        ON CONFLICT(user_id) DO UPDATE SET
            last_seen = datetime('now'),
            username = excluded.username
        "#,
    )
    .bind(user.user_id)
    .bind(&user.username)
    .bind(&user.first_name)
    .bind(&user.last_name)
    .execute(pool)
    .await?;

    get_user(pool, user.user_id).await
}

/// Get a user by platform id.
pub async fn get_user(pool: &SqlitePool, user_id: i64) -> Result<User> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT user_id, username, first_name, last_name, blocked, last_seen
        FROM users
        WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "User",
        id: user_id.to_string(),
    })
}

/// Block or unblock a user.
pub async fn set_blocked(pool: &SqlitePool, user_id: i64, blocked: bool) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE users
        SET blocked = ?
        WHERE user_id = ?
        "#,
    )
    .bind(blocked)
    .bind(user_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "User",
            id: user_id.to_string(),
        });
    }

    info!(user_id, blocked, "User block state changed");
    Ok(())
}

/// Check whether a user is blocked. Unknown users are not.
pub async fn is_blocked(pool: &SqlitePool, user_id: i64) -> Result<bool> {
    let blocked = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT blocked
        FROM users
        WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(blocked.unwrap_or(false))
}

/// Delete a user. Their deliveries go with them.
pub async fn delete_user(pool: &SqlitePool, user_id: i64) -> Result<()> {
    let result = sqlx::query(
        r#"
        DELETE FROM users
        WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "User",
            id: user_id.to_string(),
        });
    }

    Ok(())
}

/// List users, most recently seen first.
pub async fn list_users(pool: &SqlitePool, limit: i64) -> Result<Vec<User>> {
    let users = sqlx::query_as::<_, User>(
        r#"
        SELECT user_id, username, first_name, last_name, blocked, last_seen
        FROM users
        ORDER BY last_seen DESC, user_id
        LIMIT ?
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(users)
}

/// Count total users.
pub async fn count_users(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM users
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(count)
}

/// Count blocked users.
pub async fn count_blocked_users(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM users WHERE blocked
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(count)
}
