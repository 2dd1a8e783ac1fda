//! Error types for contactd-server

use thiserror::Error;

/// Failure reported by a datastore backend
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Datastore lifecycle and operation errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Required configuration (the connection string) is missing
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("failed to connect to datastore: {0}")]
    Connection(#[source] StoreError),

    #[error("failed to disconnect from datastore: {0}")]
    Disconnection(#[source] StoreError),

    /// Insert or query failed on a live connection
    #[error("datastore operation failed: {0}")]
    Persistence(#[from] StoreError),
}

pub type DbResult<T> = Result<T, DbError>;
