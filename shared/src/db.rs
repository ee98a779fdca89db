//! Database connection management.

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::time::Duration;
use tracing::info;

use crate::{Config, Error, Result};

const CREATE_APPOINTMENTS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS appointments (
        appointment_id TEXT PRIMARY KEY NOT NULL,
        name TEXT NOT NULL,
        date TEXT NOT NULL,
        time TEXT NOT NULL,
        service TEXT NOT NULL
    )
"#;

/// Create a database connection pool.
///
/// An in-memory sqlite database lives only as long as its connection, so those
/// pools are pinned to a single connection that never expires.
pub async fn create_pool(config: &Config) -> Result<SqlitePool> {
    let mut options = SqlitePoolOptions::new().acquire_timeout(Duration::from_secs(3));

    options = if config.database_url.contains(":memory:") {
        options
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        options.max_connections(config.max_connections)
    };

    let pool = options
        .connect(&config.database_url)
        .await
        .map_err(Error::Database)?;

    Ok(pool)
}

/// Create the appointments table if it does not exist yet.
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(CREATE_APPOINTMENTS_TABLE).execute(pool).await?;
    info!("appointments table ready");
    Ok(())
}

/// Connect and make sure the schema exists.
pub async fn connect(config: &Config) -> Result<SqlitePool> {
    let pool = create_pool(config).await?;
    create_schema(&pool).await?;
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for(url: &str) -> Config {
        Config {
            secret_token: "secret_key".to_string(),
            secret_token_arn: None,
            database_url: url.to_string(),
            max_connections: 5,
        }
    }

    #[tokio::test]
    async fn test_schema_creation_is_repeatable() {
        let pool = connect(&config_for("sqlite::memory:")).await.unwrap();
        create_schema(&pool).await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM appointments")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_creates_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("appointments.db");
        let url = format!("sqlite://{}?mode=rwc", path.display());

        let pool = connect(&config_for(&url)).await.unwrap();
        pool.close().await;

        assert!(path.exists());
    }
}
