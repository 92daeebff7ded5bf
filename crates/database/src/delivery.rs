//! Delivery log operations.
//!
//! A delivery is written when a copy of a file is sent to a user and
//! stamped once with `deleted_at` when that copy is removed.

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DatabaseError, Result};
use crate::models::Delivery;

/// Record that a file was sent to a user.
///
/// Fails with [`DatabaseError::InvalidReference`] if either the file or the
/// user does not exist.
pub async fn record_delivery(
    pool: &SqlitePool,
    file_id: i64,
    user_id: i64,
    sent_message_id: Option<i64>,
) -> Result<Delivery> {
    let result = sqlx::query(
        r#"
        INSERT INTO deliveries (file_id, user_id, sent_message_id)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(file_id)
    .bind(user_id)
    .bind(sent_message_id)
    .execute(pool)
    .await
    .map_err(|e| DatabaseError::from_write(e, "Delivery", format!("file {file_id}/user {user_id}")))?;

    let id = result.last_insert_rowid();
    info!(id, file_id, user_id, "Delivery recorded");

    get_delivery(pool, id).await
}

/// Stamp a delivery as deleted.
///
/// Only the first call has an effect; returns whether this call set the
/// timestamp.
pub async fn mark_deleted(pool: &SqlitePool, id: i64) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE deliveries
        SET deleted_at = datetime('now')
        WHERE id = ? AND deleted_at IS NULL
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() > 0 {
        debug!(id, "Delivery marked deleted");
        return Ok(true);
    }

    // Distinguish "already deleted" from "no such delivery".
    get_delivery(pool, id).await?;
    Ok(false)
}

/// Get a delivery by ID.
pub async fn get_delivery(pool: &SqlitePool, id: i64) -> Result<Delivery> {
    sqlx::query_as::<_, Delivery>(
        r#"
        SELECT id, file_id, user_id, sent_message_id, deleted_at
        FROM deliveries
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Delivery",
        id: id.to_string(),
    })
}

/// All deliveries made to a user, newest first.
pub async fn list_for_user(pool: &SqlitePool, user_id: i64) -> Result<Vec<Delivery>> {
    let rows = sqlx::query_as::<_, Delivery>(
        r#"
        SELECT id, file_id, user_id, sent_message_id, deleted_at
        FROM deliveries
        WHERE user_id = ?
        ORDER BY id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// All deliveries of a file, newest first.
pub async fn list_for_file(pool: &SqlitePool, file_id: i64) -> Result<Vec<Delivery>> {
    let rows = sqlx::query_as::<_, Delivery>(
        r#"
        SELECT id, file_id, user_id, sent_message_id, deleted_at
        FROM deliveries
        WHERE file_id = ?
        ORDER BY id DESC
        "#,
    )
    .bind(file_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Deliveries whose copies have not been removed yet, oldest first.
pub async fn list_undeleted(pool: &SqlitePool, limit: i64) -> Result<Vec<Delivery>> {
    let rows = sqlx::query_as::<_, Delivery>(
        r#"
        SELECT id, file_id, user_id, sent_message_id, deleted_at
        FROM deliveries
        WHERE deleted_at IS NULL
        ORDER BY id
        LIMIT ?
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Count total deliveries.
pub async fn count_deliveries(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM deliveries
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(count)
}

/// Count deliveries still awaiting removal.
pub async fn count_undeleted(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM deliveries WHERE deleted_at IS NULL
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewFile, NewUser};
    use crate::{file, user, Database};

    async fn test_db() -> Database {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        db
    }

    async fn seed(db: &Database) -> (i64, i64) {
        let u = user::upsert_user(
            db.pool(),
            &NewUser {
                user_id: 500,
                username: Some("bob".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let f = file::insert_file(
            db.pool(),
            &NewFile {
                storage_chat_id: -100200,
                storage_message_id: 9,
                file_unique_id: "uniq".to_string(),
                file_type: "document".to_string(),
                file_size: Some(2048),
                token: "deliver-me".to_string(),
                required_channels: vec![],
            },
        )
        .await
        .unwrap();

        (f.id, u.user_id)
    }

    #[tokio::test]
    async fn test_record_delivery() {
        let db = test_db().await;
        let (file_id, user_id) = seed(&db).await;

        let delivery = record_delivery(db.pool(), file_id, user_id, Some(321)).await.unwrap();
        assert_eq!(delivery.file_id, file_id);
        assert_eq!(delivery.user_id, user_id);
        assert_eq!(delivery.sent_message_id, Some(321));
        assert!(delivery.deleted_at.is_none());

        let without_message = record_delivery(db.pool(), file_id, user_id, None).await.unwrap();
        assert!(without_message.sent_message_id.is_none());

        assert_eq!(list_for_user(db.pool(), user_id).await.unwrap().len(), 2);
        assert_eq!(list_for_file(db.pool(), file_id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_parent_rejected() {
        let db = test_db().await;
        let (file_id, user_id) = seed(&db).await;

        let result = record_delivery(db.pool(), 9999, user_id, None).await;
        assert!(matches!(result, Err(DatabaseError::InvalidReference { .. })));

        let result = record_delivery(db.pool(), file_id, 9999, None).await;
        assert!(matches!(result, Err(DatabaseError::InvalidReference { .. })));

        assert_eq!(count_deliveries(db.pool()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_deleted_at_set_once() {
        let db = test_db().await;
        let (file_id, user_id) = seed(&db).await;
        let delivery = record_delivery(db.pool(), file_id, user_id, Some(1)).await.unwrap();

        assert!(mark_deleted(db.pool(), delivery.id).await.unwrap());
        let first = get_delivery(db.pool(), delivery.id).await.unwrap().deleted_at;
        assert!(first.is_some());

        // Backdate to prove a second call leaves the stamp alone.
        sqlx::query("UPDATE deliveries SET deleted_at = '2000-01-01 00:00:00' WHERE id = ?")
            .bind(delivery.id)
            .execute(db.pool())
            .await
            .unwrap();

        assert!(!mark_deleted(db.pool(), delivery.id).await.unwrap());
        let second = get_delivery(db.pool(), delivery.id).await.unwrap().deleted_at;
        assert_eq!(second.as_deref(), Some("2000-01-01 00:00:00"));

        let result = mark_deleted(db.pool(), 9999).await;
        assert!(matches!(result, Err(DatabaseError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_undeleted_queue() {
        let db = test_db().await;
        let (file_id, user_id) = seed(&db).await;
        let a = record_delivery(db.pool(), file_id, user_id, Some(1)).await.unwrap();
        let b = record_delivery(db.pool(), file_id, user_id, Some(2)).await.unwrap();

        mark_deleted(db.pool(), a.id).await.unwrap();

        let pending = list_undeleted(db.pool(), 10).await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, b.id);
        assert_eq!(count_undeleted(db.pool()).await.unwrap(), 1);
    }
}
