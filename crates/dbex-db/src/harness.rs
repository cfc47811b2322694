//! Side-by-side execution of a naive and an optimized catalogue operation.
//!
//! [`compare`] awaits the naive future, then the optimized one, recording the
//! wall-clock time and the statements each issued. Timings are reported for
//! information only; equivalence of the two results is what callers assert.

use std::future::Future;
use std::time::{Duration, Instant};

use crate::DbexDb;
use crate::error::DatabaseError;
use crate::stats::QueryStats;

/// A result together with what it cost to produce.
#[derive(Debug, Clone)]
pub struct Timed<T> {
    pub value: T,
    pub elapsed: Duration,
    pub stats: QueryStats,
}

#[derive(Debug, Clone)]
pub struct Comparison<T> {
    pub name: String,
    pub naive: Timed<T>,
    pub optimized: Timed<T>,
}

impl<T: PartialEq> Comparison<T> {
    /// Both variants returned exactly the same value.
    #[must_use]
    pub fn is_equivalent(&self) -> bool {
        self.naive.value == self.optimized.value
    }
}

impl<T> Comparison<T> {
    /// Both variants agree once normalized by `key` (e.g. sorted, for results
    /// whose order is unspecified).
    pub fn equivalent_by<K: PartialEq>(&self, key: impl Fn(&T) -> K) -> bool {
        key(&self.naive.value) == key(&self.optimized.value)
    }

    /// Statements the optimized variant saved.
    #[must_use]
    pub fn statements_saved(&self) -> i128 {
        i128::from(self.naive.stats.statements()) - i128::from(self.optimized.stats.statements())
    }
}

fn millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

async fn timed<T>(
    db: &DbexDb,
    operation: impl Future<Output = Result<T, DatabaseError>>,
) -> Result<Timed<T>, DatabaseError> {
    let before = db.stats();
    let start = Instant::now();
    let value = operation.await?;
    let elapsed = start.elapsed();
    Ok(Timed {
        value,
        elapsed,
        stats: db.stats().since(&before),
    })
}

/// Run `naive` then `optimized` against `db` and report both.
///
/// # Errors
///
/// Propagates the first error raised by either operation; the optimized
/// operation is not run if the naive one fails.
pub async fn compare<T>(
    db: &DbexDb,
    name: &str,
    naive: impl Future<Output = Result<T, DatabaseError>>,
    optimized: impl Future<Output = Result<T, DatabaseError>>,
) -> Result<Comparison<T>, DatabaseError> {
    let naive = timed(db, naive).await?;
    let optimized = timed(db, optimized).await?;

    tracing::info!(
        example = name,
        naive_ms = millis(naive.elapsed),
        optimized_ms = millis(optimized.elapsed),
        naive_statements = naive.stats.statements(),
        optimized_statements = optimized.stats.statements(),
        naive_rows = naive.stats.rows_read(),
        optimized_rows = optimized.stats.rows_read(),
        "comparison finished"
    );

    Ok(Comparison {
        name: name.to_string(),
        naive,
        optimized,
    })
}
