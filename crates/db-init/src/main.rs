use std::time::Duration;

use clap::Parser;
use database::{delivery, file, setting, user, Database};
use tracing::info;

const DEFAULT_DATABASE_URL: &str = "sqlite:filedrop.db?mode=rwc";

#[derive(Debug, Parser)]
#[command(name = "db-init")]
#[command(about = "Create or upgrade the filedrop database and seed default settings")]
struct Args {
    /// SQLite database URL. Falls back to DATABASE_URL env.
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    database_url: String,

    /// Maximum pool connections
    #[arg(long, default_value_t = 1)]
    pool_size: u32,
}

/// Row counts and settings after bootstrap.
#[derive(Debug, PartialEq, Eq)]
struct Summary {
    settings: Vec<(String, String)>,
    delete_timeout: Duration,
    users: i64,
    files: i64,
    deliveries: i64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let db = Database::connect_with_pool_size(&args.database_url, args.pool_size).await?;
    db.bootstrap().await?;

    let summary = summarize(&db).await?;
    info!(
        users = summary.users,
        files = summary.files,
        deliveries = summary.deliveries,
        "Database ready"
    );

    println!("Database ready: {}", args.database_url);
    for (key, value) in &summary.settings {
        println!("  setting {key} = {value}");
    }
    println!("  delete timeout: {}s", summary.delete_timeout.as_secs());
    println!("  users: {}", summary.users);
    println!("  files: {}", summary.files);
    println!("  deliveries: {}", summary.deliveries);

    db.close().await;
    Ok(())
}

async fn summarize(db: &Database) -> database::Result<Summary> {
    let pool = db.pool();

    let settings = setting::list_settings(pool)
        .await?
        .into_iter()
        .map(|s| (s.key, s.value))
        .collect();

    Ok(Summary {
        settings,
        delete_timeout: setting::delete_timeout(pool).await?,
        users: user::count_users(pool).await?,
        files: file::count_files(pool).await?,
        deliveries: delivery::count_deliveries(pool).await?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_explicit_url() {
        let args = Args::parse_from(["db-init", "--database-url", "sqlite::memory:"]);
        assert_eq!(args.database_url, "sqlite::memory:");
        assert_eq!(args.pool_size, 1);
    }

    #[tokio::test]
    async fn test_summary_after_bootstrap() {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.bootstrap().await.unwrap();
        db.bootstrap().await.unwrap();

        let summary = summarize(&db).await.unwrap();
        assert_eq!(
            summary,
            Summary {
                settings: vec![(
                    setting::DELETE_TIMEOUT_KEY.to_string(),
                    "20".to_string()
                )],
                delete_timeout: Duration::from_secs(20),
                users: 0,
                files: 0,
                deliveries: 0,
            }
        );
    }
}
