//! Database pool construction and schema bootstrap.

use diesel::PgConnection;
use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use thiserror::Error;
use tracing::info;

use crate::config::{ConfigError, DatabaseSettings};

/// `PostgreSQL` connection pool type.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

const SCHEMA: &str = include_str!("../migrations/2021-06-01-000000_create_landau_tables/up.sql");

/// Errors raised while preparing the database.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// The connection settings are unusable.
    #[error(transparent)]
    Settings(#[from] ConfigError),

    /// The pool could not be built or handed out no connection.
    #[error("connection pool error: {0}")]
    Pool(#[from] PoolError),

    /// Applying the schema failed.
    #[error("schema bootstrap failed: {0}")]
    Schema(#[from] diesel::result::Error),

    /// The blocking task was cancelled or panicked.
    #[error("blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Builds a connection pool for the configured database.
///
/// # Errors
///
/// Returns [`DatabaseError`] when the URL is invalid or no connection can be
/// established.
pub async fn build_pool(settings: &DatabaseSettings) -> Result<PgPool, DatabaseError> {
    let url = settings.connection_url()?;
    let max_size = settings.max_connections;
    let pool = tokio::task::spawn_blocking(move || {
        Pool::builder()
            .max_size(max_size)
            .build(ConnectionManager::<PgConnection>::new(url))
    })
    .await??;
    Ok(pool)
}

/// Creates every missing table; existing tables are left untouched.
///
/// # Errors
///
/// Returns [`DatabaseError`] when no connection is available or a statement
/// fails.
pub async fn bootstrap_schema(pool: &PgPool) -> Result<(), DatabaseError> {
    let pool_handle = pool.clone();
    tokio::task::spawn_blocking(move || -> Result<(), DatabaseError> {
        let mut connection = pool_handle.get()?;
        connection.batch_execute(SCHEMA)?;
        Ok(())
    })
    .await??;
    info!("database schema is up to date");
    Ok(())
}
