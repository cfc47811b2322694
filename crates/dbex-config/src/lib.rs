//! # dbex-config
//!
//! Layered configuration loading for dbex using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`DBEX_*` prefix, `__` as separator)
//! 2. Project-level `.dbex/config.toml`
//! 3. User-level `~/.config/dbex/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `DBEX_STORE__LOCATION` -> `store.location`,
//! `DBEX_FIXTURES__RETRIEVAL__AUTHORS` -> `fixtures.retrieval.authors`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use dbex_config::DbexConfig;
//!
//! let config = DbexConfig::load().expect("config");
//! if config.store.is_in_memory() {
//!     println!("seeding {} authors", config.fixtures.retrieval.authors);
//! }
//! ```

mod error;
mod fixtures;
mod store;

pub use error::ConfigError;
pub use fixtures::{FixtureSpec, FixturesConfig};
pub use store::{IN_MEMORY, StoreConfig};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DbexConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub fixtures: FixturesConfig,
}

impl DbexConfig {
    /// Load configuration from all sources (TOML files + environment variables)
    /// and validate it.
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if extraction fails, or
    /// `ConfigError::InvalidValue` if a value is unusable.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration after reading the nearest `.env` at or above the
    /// current directory. Variables already in the environment win.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        if let Ok(cwd) = std::env::current_dir() {
            Self::load_dotenv(&cwd);
        }
        Self::load()
    }

    /// Read the first `.env` found in `start` or one of its ancestors.
    ///
    /// Returns the file that was loaded, if any.
    pub fn load_dotenv(start: &Path) -> Option<PathBuf> {
        let env_path = start
            .ancestors()
            .map(|dir| dir.join(".env"))
            .find(|candidate| candidate.is_file())?;
        dotenvy::from_path(&env_path).ok()?;
        Some(env_path)
    }

    /// Extract and validate from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".dbex/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("DBEX_").split("__"))
    }

    /// Validate every section.
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError::InvalidValue` found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.store.validate()?;
        self.fixtures.validate()
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("dbex").join("config.toml"))
    }

}
