use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors from the credential and note stores
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Duplicate value for unique field: {0}")]
    Duplicate(&'static str),

    #[error("Corrupt record: {0}")]
    Corrupt(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Tables are created idempotently on every boot.
const SCHEMA: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS users (
        id            UUID PRIMARY KEY,
        email         TEXT NOT NULL UNIQUE,
        username      TEXT,
        password_hash TEXT NOT NULL,
        created_at    TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )"#,
    r#"CREATE TABLE IF NOT EXISTS drawers (
        id            UUID PRIMARY KEY,
        drawer_name   TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        created_at    TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )"#,
    r#"CREATE TABLE IF NOT EXISTS notes (
        id          UUID PRIMARY KEY,
        owner_type  TEXT NOT NULL CHECK (owner_type IN ('user', 'drawer')),
        owner_id    UUID NOT NULL,
        title       TEXT NOT NULL DEFAULT '',
        content     TEXT NOT NULL DEFAULT '',
        created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at  TIMESTAMPTZ
    )"#,
    r#"CREATE INDEX IF NOT EXISTS notes_owner_created_idx
        ON notes (owner_type, owner_id, created_at DESC)"#,
];

/// Connection bootstrap for the PostgreSQL store
pub struct DatabaseManager;

impl DatabaseManager {
    /// Open the pool and verify connectivity. Callers treat failure as fatal.
    pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(&config.url)
            .await?;

        info!("Connected database pool (max_connections={})", config.max_connections);
        Ok(pool)
    }

    pub async fn migrate(pool: &PgPool) -> Result<(), DatabaseError> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(pool).await?;
        }
        info!("Database schema is up to date");
        Ok(())
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }

    /// Map a unique-constraint violation onto [`DatabaseError::Duplicate`].
    pub(crate) fn map_unique(err: sqlx::Error, field: &'static str) -> DatabaseError {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => DatabaseError::Duplicate(field),
            _ => DatabaseError::Sqlx(err),
        }
    }
}
