//! `PostgreSQL` pool construction and schema installation.

use crate::config::DatabaseConfig;
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use thiserror::Error;

/// Connection pool shared by the account and order repositories.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Schema for users and orders. Every statement is idempotent.
pub const SCHEMA_SQL: &str =
    include_str!("../migrations/2026-10-01-000000_create_users_and_orders/up.sql");

/// Errors raised while connecting or installing the schema.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The pool could not be built or a connection checked out.
    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    /// A schema statement failed.
    #[error("schema installation failed: {0}")]
    Schema(#[from] diesel::result::Error),
    /// The blocking task panicked or was cancelled.
    #[error("blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Builds a connection pool for `config`.
///
/// # Errors
///
/// Returns [`StorageError::Pool`] when no connection can be established.
pub fn connect(config: &DatabaseConfig) -> Result<PgPool, StorageError> {
    let manager = ConnectionManager::<PgConnection>::new(&config.url);
    Pool::builder()
        .max_size(config.max_connections)
        .build(manager)
        .map_err(StorageError::Pool)
}

/// Creates the tables and indexes when they do not exist yet.
///
/// # Errors
///
/// Returns [`StorageError`] when a connection cannot be checked out or a
/// statement fails.
pub async fn apply_schema(pool: &PgPool) -> Result<(), StorageError> {
    let shared = pool.clone();
    tokio::task::spawn_blocking(move || -> Result<(), StorageError> {
        let mut connection = shared.get()?;
        connection.batch_execute(SCHEMA_SQL)?;
        Ok(())
    })
    .await?
}
