//! File catalog operations.

use sqlx::types::Json;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DatabaseError, Result};
use crate::models::{FileRecord, FileSummary, NewFile};

/// Default row count for [`list_recent_files`] callers that have no preference.
pub const DEFAULT_LIST_LIMIT: i64 = 200;

const FILE_COLUMNS: &str = "id, storage_chat_id, storage_message_id, file_unique_id, file_type, \
     file_size, token, required_channels, active, views, created_at";

/// Register a new file.
///
/// Fails with [`DatabaseError::AlreadyExists`] if the token is taken.
pub async fn insert_file(pool: &SqlitePool, file: &NewFile) -> Result<FileRecord> {
    let result = sqlx::query(
        r#"
        INSERT INTO files (
            storage_chat_id, storage_message_id, file_unique_id, file_type,
            file_size, token, required_channels
        )
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(file.storage_chat_id)
    .bind(file.storage_message_id)
    .bind(&file.file_unique_id)
    .bind(&file.file_type)
    .bind(file.file_size.unwrap_or(0))
    .bind(&file.token)
    .bind(Json(&file.required_channels))
    .execute(pool)
    .await
    .map_err(|e| DatabaseError::from_write(e, "File", file.token.as_str()))?;

    let id = result.last_insert_rowid();
    info!(
        id,
        file_type = %file.file_type,
        storage_chat_id = file.storage_chat_id,
        storage_message_id = file.storage_message_id,
        "File registered"
    );

    get_file(pool, id).await
}

/// Get a file by ID.
pub async fn get_file(pool: &SqlitePool, id: i64) -> Result<FileRecord> {
    let query = format!("SELECT {FILE_COLUMNS} FROM files WHERE id = ?");
    sqlx::query_as::<_, FileRecord>(&query)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| DatabaseError::NotFound {
            entity: "File",
            id: id.to_string(),
        })
}

/// Get a file by token, active or not.
pub async fn get_file_by_token(pool: &SqlitePool, token: &str) -> Result<FileRecord> {
    let query = format!("SELECT {FILE_COLUMNS} FROM files WHERE token = ?");
    sqlx::query_as::<_, FileRecord>(&query)
        .bind(token)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| DatabaseError::NotFound {
            entity: "File",
            id: token.to_string(),
        })
}

/// Resolve a token to a deliverable file.
///
/// Deactivated files do not resolve.
pub async fn get_active_file_by_token(pool: &SqlitePool, token: &str) -> Result<Option<FileRecord>> {
    let query = format!("SELECT {FILE_COLUMNS} FROM files WHERE token = ? AND active");
    let record = sqlx::query_as::<_, FileRecord>(&query)
        .bind(token)
        .fetch_optional(pool)
        .await?;

    Ok(record)
}

/// Bump the view counter by one.
pub async fn increment_views(pool: &SqlitePool, id: i64) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE files
        SET views = views + 1
        WHERE id = ?
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "File",
            id: id.to_string(),
        });
    }

    debug!(id, "File view counted");
    Ok(())
}

/// Enable or disable a file.
pub async fn set_active(pool: &SqlitePool, id: i64, active: bool) -> Result<FileRecord> {
    let result = sqlx::query(
        r#"
        UPDATE files
        SET active = ?
        WHERE id = ?
        "#,
    )
    .bind(active)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "File",
            id: id.to_string(),
        });
    }

    info!(id, active, "File active flag changed");
    get_file(pool, id).await
}

/// List the most recently registered files.
pub async fn list_recent_files(pool: &SqlitePool, limit: i64) -> Result<Vec<FileSummary>> {
    let files = sqlx::query_as::<_, FileSummary>(
        r#"
        SELECT id, token, created_at, views, active
        FROM files
        ORDER BY created_at DESC, id DESC
        LIMIT ?
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(files)
}

/// Delete a file. Its deliveries go with it.
pub async fn delete_file(pool: &SqlitePool, id: i64) -> Result<()> {
    let result = sqlx::query(
        r#"
        DELETE FROM files
        WHERE id = ?
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "File",
            id: id.to_string(),
        });
    }

    Ok(())
}

/// Count total files.
pub async fn count_files(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM files
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(count)
}

/// Count files that still resolve.
pub async fn count_active_files(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM files WHERE active
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(count)
}

/// Sum of views across all files.
pub async fn total_views(pool: &SqlitePool) -> Result<i64> {
    let total = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COALESCE(SUM(views), 0) FROM files
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(total)
}
