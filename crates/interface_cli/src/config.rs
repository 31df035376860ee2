//! Application configuration
//!
//! Sources, lowest priority first: built-in defaults, an optional TOML file
//! and `LEDGER__*` environment variables (`__` separates nesting levels,
//! e.g. `LEDGER__LEDGER__TAX_RATE=0.18` or `LEDGER__STORAGE__DOCUMENT_PATH=...`).

use std::path::Path;

use config::{Config, Environment, File, FileFormat};
use domain_ledger::{LedgerConfig, StorageConfig};
use serde::Deserialize;

use crate::error::CliError;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "LEDGER";

/// Configuration file read when present
pub const DEFAULT_CONFIG_FILE: &str = "config/ledger.toml";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Business constants and lookup rules
    pub ledger: LedgerConfig,
    /// Document and audit log locations
    pub storage: StorageConfig,
    /// Log level
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ledger: LedgerConfig::default(),
            storage: StorageConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from the default file and the environment
    pub fn from_env() -> Result<Self, CliError> {
        Self::load(DEFAULT_CONFIG_FILE, Self::environment())
    }

    /// Loads configuration from `file` (skipped when missing) and `env`
    ///
    /// # Errors
    ///
    /// - `Config` if a source cannot be read or does not deserialize
    /// - `Ledger` if the resulting ledger configuration does not validate
    pub fn load(file: impl AsRef<Path>, env: Environment) -> Result<Self, CliError> {
        let app: Self = Config::builder()
            .add_source(
                File::from(file.as_ref())
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(env)
            .build()?
            .try_deserialize()?;

        app.ledger.validate()?;
        Ok(app)
    }

    /// The environment source used by [`from_env`](Self::from_env)
    pub fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true)
    }
}
