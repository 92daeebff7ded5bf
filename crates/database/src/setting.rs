//! Settings storage.

use std::time::Duration;

use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use crate::models::Setting;
use crate::Result;

/// Key holding the auto-delete delay for delivered copies, in seconds.
pub const DELETE_TIMEOUT_KEY: &str = "delete_timeout_seconds";

/// Delete timeout used when the setting is missing or malformed.
pub const DEFAULT_DELETE_TIMEOUT_SECS: u64 = 20;

/// Rows inserted on bootstrap when absent.
pub const DEFAULTS: &[(&str, &str)] = &[(DELETE_TIMEOUT_KEY, "20")];

/// Get a setting by key.
pub async fn get_setting(pool: &SqlitePool, key: &str) -> Result<Option<Setting>> {
    let record = sqlx::query_as::<_, Setting>(
        r#"
        SELECT key, value
        FROM settings
        WHERE key = ?
        "#,
    )
    .bind(key)
    .fetch_optional(pool)
    .await?;

    Ok(record)
}

/// Get a setting's value, or `default` if it is not set.
pub async fn get_value_or(pool: &SqlitePool, key: &str, default: &str) -> Result<String> {
    Ok(get_setting(pool, key)
        .await?
        .map(|s| s.value)
        .unwrap_or_else(|| default.to_string()))
}

/// Create or overwrite a setting.
pub async fn set_setting(pool: &SqlitePool, key: &str, value: &str) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO settings (key, value)
        VALUES (?, ?)
        ON CONFLICT(key) DO UPDATE SET
            value = excluded.value
        "#,
    )
    .bind(key)
    .bind(value)
    .execute(pool)
    .await?;

    debug!(key, value, "Setting updated");
    Ok(())
}

/// Insert every default setting that is not already present.
///
/// Existing values are left alone. Returns the number of rows inserted.
pub async fn seed_defaults(pool: &SqlitePool) -> Result<u64> {
    let mut inserted = 0;

    for (key, value) in DEFAULTS {
        let result = sqlx::query(
            r#"
            INSERT INTO settings (key, value)
            VALUES (?, ?)
            ON CONFLICT(key) DO NOTHING
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(pool)
        .await?;

        inserted += result.rows_affected();
    }

    info!(inserted, "Default settings seeded");
    Ok(inserted)
}

/// List all settings.
pub async fn list_settings(pool: &SqlitePool) -> Result<Vec<Setting>> {
    let settings = sqlx::query_as::<_, Setting>(
        r#"
        SELECT key, value
        FROM settings
        ORDER BY key
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(settings)
}

/// Read the delete timeout.
///
/// Falls back to [`DEFAULT_DELETE_TIMEOUT_SECS`] when the row is missing or
/// does not hold a non-negative integer.
pub async fn delete_timeout(pool: &SqlitePool) -> Result<Duration> {
    let secs = match get_setting(pool, DELETE_TIMEOUT_KEY).await? {
        Some(setting) => match setting.value.trim().parse::<u64>() {
            Ok(secs) => secs,
            Err(_) => {
                warn!(
                    value = %setting.value,
                    "Invalid {}, using default", DELETE_TIMEOUT_KEY
                );
                DEFAULT_DELETE_TIMEOUT_SECS
            }
        },
        None => DEFAULT_DELETE_TIMEOUT_SECS,
    };

    Ok(Duration::from_secs(secs))
}

/// Store a new delete timeout, truncated to whole seconds.
pub async fn set_delete_timeout(pool: &SqlitePool, timeout: Duration) -> Result<()> {
    set_setting(pool, DELETE_TIMEOUT_KEY, &timeout.as_secs().to_string()).await
}
