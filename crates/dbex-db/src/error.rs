//! Database error types for dbex-db.

use thiserror::Error;

/// Errors from store, fixture and catalogue operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed or returned unparseable data.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Operation not valid in the current session state
    /// (e.g. commit without an open transaction).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Fixture directory or file handling failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Store or fixture configuration was rejected.
    #[error(transparent)]
    Config(#[from] dbex_config::ConfigError),
}
