//! Shared setup for dbex-db integration tests.

#![allow(dead_code)]

use chrono::{DateTime, Utc};
use dbex_config::{FixtureSpec, StoreConfig};
use dbex_db::fixtures::FixtureStore;

/// Install a test-writer subscriber once. Filter comes from `DBEX_LOG`
/// (default `info`, so harness timing reports show with `--nocapture`).
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("DBEX_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

pub async fn seed(spec: &FixtureSpec, base: DateTime<Utc>) -> FixtureStore {
    init_tracing();
    FixtureStore::seed(&StoreConfig::in_memory(), spec, base)
        .await
        .expect("fixture seeds")
}
