//! Round-trip accounting.
//!
//! Every statement issued through [`DbexDb::query`](crate::DbexDb::query) or
//! [`DbexDb::execute`](crate::DbexDb::execute) is counted here, keyed by its SQL
//! text, together with the number of rows pulled back to the client. The
//! catalogue's naive and optimized variants differ precisely in these numbers.

use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryStats {
    statements: u64,
    rows_read: u64,
    per_statement: HashMap<String, u64>,
}

impl QueryStats {
    pub(crate) fn record_statement(&mut self, sql: &str) {
        self.statements += 1;
        *self.per_statement.entry(sql.to_string()).or_default() += 1;
    }

    pub(crate) const fn record_rows(&mut self, rows: u64) {
        self.rows_read += rows;
    }

    /// Total statements executed.
    #[must_use]
    pub const fn statements(&self) -> u64 {
        self.statements
    }

    /// Total rows materialized on the client.
    #[must_use]
    pub const fn rows_read(&self) -> u64 {
        self.rows_read
    }

    /// How many times exactly this SQL text was executed.
    #[must_use]
    pub fn executions_of(&self, sql: &str) -> u64 {
        self.per_statement.get(sql).copied().unwrap_or(0)
    }

    /// Activity recorded after `earlier` was taken.
    #[must_use]
    pub fn since(&self, earlier: &Self) -> Self {
        let per_statement = self
            .per_statement
            .iter()
            .filter_map(|(sql, &count)| {
                let delta = count.saturating_sub(earlier.executions_of(sql));
                (delta > 0).then(|| (sql.clone(), delta))
            })
            .collect();
        Self {
            statements: self.statements.saturating_sub(earlier.statements),
            rows_read: self.rows_read.saturating_sub(earlier.rows_read),
            per_statement,
        }
    }
}
