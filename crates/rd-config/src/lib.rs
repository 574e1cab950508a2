//! # rd-config
//!
//! Layered configuration loading for Readiness using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`READINESS_*` prefix, `__` as separator)
//! 2. Project-level `.readiness/config.toml`
//! 3. User-level `~/.config/readiness/config.toml`
//! 4. Built-in defaults
//!
//! Figment maps `READINESS_SERVER__PORT` -> `server.port`,
//! `READINESS_DATABASE__PATH` -> `database.path`, etc.
//!
//! ```no_run
//! use rd_config::RdConfig;
//!
//! let config = RdConfig::load_with_dotenv().expect("config");
//! println!("serving on {}", config.server.bind_address());
//! ```

mod database;
mod error;
mod general;
mod server;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use server::{DEFAULT_PORT, ServerConfig};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix for every setting.
pub const ENV_PREFIX: &str = "READINESS_";

/// Name of the project-local state directory.
pub const PROJECT_DIR: &str = ".readiness";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RdConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl RdConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be parsed or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration after reading `.env` from the current directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be parsed or a value is invalid.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain rooted at the current directory.
    pub fn figment() -> Figment {
        Self::figment_for(Path::new("."))
    }

    /// Build the figment provider chain for the project rooted at `root`.
    ///
    /// Public so tests and the CLI `--project` flag can point at another root.
    pub fn figment_for(root: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = root.join(PROJECT_DIR).join("config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Reject values that would only fail later at bind or query time.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database.path".into(),
                reason: "must not be empty".into(),
            });
        }
        if self.general.default_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "general.default_limit".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.general.default_actor.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "general.default_actor".into(),
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }

    /// Database path resolved against the project root (unless in-memory or absolute).
    #[must_use]
    pub fn database_path(&self, root: &Path) -> PathBuf {
        let path = PathBuf::from(&self.database.path);
        if self.database.is_in_memory() || path.is_absolute() {
            path
        } else {
            root.join(path)
        }
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("readiness").join("config.toml"))
    }
}
