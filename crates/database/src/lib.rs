//! SQLite persistence layer for filedrop.
//!
//! This crate owns the schema of the file-sharing bot (settings, users,
//! files and deliveries) and provides async operations over it using SQLx
//! with SQLite.
//!
//! # Example
//!
//! ```no_run
//! use database::{file, models::NewFile, Database};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect, run migrations and seed default settings
//!     let db = Database::connect("sqlite:filedrop.db?mode=rwc").await?;
//!     db.bootstrap().await?;
//!
//!     // Register a file posted to the storage channel
//!     let new_file = NewFile {
//!         storage_chat_id: -1001234567890,
//!         storage_message_id: 42,
//!         file_unique_id: "AgADBAADbaciAAG".to_string(),
//!         file_type: "video".to_string(),
//!         file_size: Some(10_485_760),
//!         token: "3f9c2a7e1b4d".to_string(),
//!         required_channels: vec![-1009876543210],
//!     };
//!     let record = file::insert_file(db.pool(), &new_file).await?;
//!     assert!(record.active);
//!
//!     Ok(())
//! }
//! ```

pub mod delivery;
pub mod error;
pub mod file;
pub mod models;
pub mod setting;
pub mod user;

pub use error::{DatabaseError, Result};
pub use models::{Delivery, FileRecord, FileSummary, NewFile, NewUser, Setting, User};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Database connection wrapper.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Default pool size for database connections.
    const DEFAULT_POOL_SIZE: u32 = 20;

    /// Connect to a SQLite database.
    ///
    /// The URL should be in the format `sqlite:path/to/db.sqlite?mode=rwc`.
    /// Use `?mode=rwc` to create the database file if it doesn't exist.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example() -> database::Result<()> {
    /// // File database
    /// let db = database::Database::connect("sqlite:data/filedrop.db?mode=rwc").await?;
    ///
    /// // In-memory database (for testing)
    /// let db = database::Database::connect("sqlite::memory:").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_pool_size(url, Self::DEFAULT_POOL_SIZE).await
    }

    /// Connect to a SQLite database with a custom pool size.
    ///
    /// Foreign keys are enforced on every connection; delivery cascades
    /// depend on it.
    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await?;

        tracing::info!(
            "Connected to database: {} (pool size: {})",
            url,
            pool_size
        );

        Ok(Self { pool })
    }

    /// Run database migrations.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running database migrations...");

        sqlx::migrate!("./migrations").run(&self.pool).await?;

        tracing::info!("Migrations complete");
        Ok(())
    }

    /// Migrate and seed default settings.
    ///
    /// Safe to run on every start: existing settings are never overwritten.
    pub async fn bootstrap(&self) -> Result<()> {
        self.migrate().await?;
        setting::seed_defaults(&self.pool).await?;
        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
