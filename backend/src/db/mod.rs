//! Database module for SQLite persistence.
//!
//! SQLite holds the user accounts, both content documents and the session table.

mod repository;
mod seed;

pub use repository::*;
pub use seed::*;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;

use crate::config::Config;

/// Create the database connection pool.
///
/// The pool connects lazily, so an unreachable database does not prevent the
/// server from starting; the first query reports the failure instead.
pub async fn init_database(db_path: &Path) -> Result<SqlitePool, sqlx::Error> {
    // Ensure the parent directory exists
    if let Some(parent) = db_path.parent() {
        if let Err(e) = tokio::fs::create_dir_all(parent).await {
            tracing::warn!("Could not create database directory {:?}: {}", parent, e);
        }
    }

    let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

    let options = SqliteConnectOptions::from_str(&db_url)?
        .create_if_missing(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_lazy_with(options);

    Ok(pool)
}

/// Run database migrations.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    // The UNIQUE constraint backs the handler-side duplicate check, so two
    // concurrent creations of the same username cannot both commit.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            username TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            role TEXT NOT NULL DEFAULT 'editor' CHECK (role IN ('admin', 'editor')),
            created_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS content (
            language TEXT PRIMARY KEY CHECK (language IN ('en', 'fr')),
            body TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_users_created_at ON users(created_at);")
        .execute(pool)
        .await?;

    Ok(())
}

/// Create the schema and seed defaults. Failures are logged, never fatal.
pub async fn prepare(repo: &Repository, config: &Config) {
    if let Err(e) = run_migrations(repo.pool()).await {
        tracing::error!("Database setup failed: {}", e);
        return;
    }

    if let Err(e) = seed_defaults(repo, config).await {
        tracing::error!("Error initializing database: {}", e);
    }
}
