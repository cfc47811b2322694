//! Fixture store location.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Location string for a purely in-memory store.
pub const IN_MEMORY: &str = ":memory:";

fn default_location() -> String {
    IN_MEMORY.to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// `":memory:"`, or a directory under which each run creates its own
    /// database file.
    #[serde(default = "default_location")]
    pub location: String,

    /// Leave database files on disk after teardown (for inspection).
    #[serde(default)]
    pub keep_artifacts: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            location: default_location(),
            keep_artifacts: false,
        }
    }
}

impl StoreConfig {
    /// In-memory store, nothing touches the filesystem.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// File-backed store rooted at `dir`.
    #[must_use]
    pub fn on_disk(dir: impl Into<String>) -> Self {
        Self {
            location: dir.into(),
            keep_artifacts: false,
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.location == IN_MEMORY
    }

    /// Reject an empty location.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` when `location` is blank.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.location.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "store.location".into(),
                reason: format!("must be '{IN_MEMORY}' or a directory path"),
            });
        }
        Ok(())
    }
}
