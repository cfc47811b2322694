//! # dbex-db
//!
//! libSQL-backed fixture store for the dbex query catalogue.
//!
//! Holds the four fixture record kinds (accounts, authors, documents, users),
//! seeds and tears them down per verification run, and exposes the catalogue
//! of naive vs. optimized data-access pairs together with the harness that
//! compares them.
//!
//! Every statement is routed through [`DbexDb::query`] / [`DbexDb::execute`]
//! so the number of round trips and rows read can be asserted on.

pub mod catalogue;
pub mod error;
pub mod fixtures;
pub mod harness;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod sink;
pub mod stats;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use error::DatabaseError;
use libsql::Builder;
use libsql::params::IntoParams;
use stats::QueryStats;

/// Path understood by libSQL as "no file, keep everything in memory".
pub const IN_MEMORY_PATH: &str = ":memory:";

/// Store handle: one libSQL database, one connection.
///
/// Reads and writes are issued sequentially over the single connection.
/// Statement counts are tracked in [`QueryStats`].
pub struct DbexDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
    stats: Mutex<QueryStats>,
    in_transaction: AtomicBool,
}

impl DbexDb {
    /// Open a local database at the given path.
    ///
    /// Runs migrations automatically on first open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let dbex_db = Self {
            db,
            conn,
            stats: Mutex::new(QueryStats::default()),
            in_transaction: AtomicBool::new(false),
        };
        dbex_db.run_migrations().await?;
        tracing::debug!(path, "store opened");
        Ok(dbex_db)
    }

    /// Open a throwaway in-memory database.
    ///
    /// # Errors
    ///
    /// See [`Self::open_local`].
    pub async fn open_in_memory() -> Result<Self, DatabaseError> {
        Self::open_local(IN_MEMORY_PATH).await
    }

    /// Access the underlying libSQL connection. Statements issued here are
    /// not counted.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Run a query and map every row it returns with `map`.
    ///
    /// Rows are only valid until the cursor advances, so each one is mapped
    /// before the next is fetched.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::LibSql` if the statement fails, or whatever
    /// `map` returns for a row it cannot read.
    pub async fn query<T>(
        &self,
        sql: &str,
        params: impl IntoParams,
        mut map: impl FnMut(&libsql::Row) -> Result<T, DatabaseError>,
    ) -> Result<Vec<T>, DatabaseError> {
        tracing::debug!(sql, "query");
        let mut rows = self.conn.query(sql, params).await?;
        self.lock_stats().record_statement(sql);
        let mut collected = Vec::new();
        while let Some(row) = rows.next().await? {
            self.lock_stats().record_rows(1);
            collected.push(map(&row)?);
        }
        Ok(collected)
    }

    /// Run a query and map at most its first row.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::LibSql` if the statement fails, or whatever
    /// `map` returns for the row.
    pub async fn query_first<T>(
        &self,
        sql: &str,
        params: impl IntoParams,
        map: impl FnOnce(&libsql::Row) -> Result<T, DatabaseError>,
    ) -> Result<Option<T>, DatabaseError> {
        tracing::debug!(sql, "query_first");
        let mut rows = self.conn.query(sql, params).await?;
        self.lock_stats().record_statement(sql);
        match rows.next().await? {
            Some(row) => {
                self.lock_stats().record_rows(1);
                map(&row).map(Some)
            }
            None => Ok(None),
        }
    }

    /// Execute a statement that returns no rows. Returns the number of rows
    /// changed.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::LibSql` if the statement fails.
    pub async fn execute(&self, sql: &str, params: impl IntoParams) -> Result<u64, DatabaseError> {
        tracing::debug!(sql, "execute");
        let changed = self.conn.execute(sql, params).await?;
        self.lock_stats().record_statement(sql);
        Ok(changed)
    }

    /// Rowid assigned by the most recent successful insert.
    #[must_use]
    pub fn last_insert_id(&self) -> i64 {
        self.conn.last_insert_rowid()
    }

    /// Open a transaction.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidState` if a transaction is already open.
    pub async fn begin(&self) -> Result<(), DatabaseError> {
        if self.in_transaction.swap(true, Ordering::SeqCst) {
            return Err(DatabaseError::InvalidState(
                "a transaction is already open".into(),
            ));
        }
        if let Err(e) = self.conn.execute("BEGIN", ()).await {
            self.in_transaction.store(false, Ordering::SeqCst);
            return Err(e.into());
        }
        Ok(())
    }

    /// Commit the open transaction.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidState` if no transaction is open.
    pub async fn commit(&self) -> Result<(), DatabaseError> {
        self.finish_transaction("COMMIT").await
    }

    /// Roll back the open transaction, discarding everything saved in it.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidState` if no transaction is open.
    pub async fn rollback(&self) -> Result<(), DatabaseError> {
        self.finish_transaction("ROLLBACK").await
    }

    #[must_use]
    pub fn in_transaction(&self) -> bool {
        self.in_transaction.load(Ordering::SeqCst)
    }

    async fn finish_transaction(&self, statement: &str) -> Result<(), DatabaseError> {
        if !self.in_transaction() {
            return Err(DatabaseError::InvalidState(format!(
                "cannot {}: no open transaction",
                statement.to_lowercase()
            )));
        }
        let result = self.conn.execute(statement, ()).await;
        // SQLite can keep the transaction open after a failed COMMIT.
        if result.is_ok() || statement == "ROLLBACK" || self.conn.is_autocommit() {
            self.in_transaction.store(false, Ordering::SeqCst);
        }
        result?;
        Ok(())
    }

    /// Snapshot of the statements executed so far.
    #[must_use]
    pub fn stats(&self) -> QueryStats {
        self.lock_stats().clone()
    }

    /// Forget everything counted so far.
    pub fn reset_stats(&self) {
        *self.lock_stats() = QueryStats::default();
    }

    fn lock_stats(&self) -> MutexGuard<'_, QueryStats> {
        self.stats.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod test_support;
