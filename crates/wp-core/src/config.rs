//! Configuration types and parsing for waypoint.yml
//!
//! The file is optional. Every key has a default, and CLI flags override
//! whatever the file sets.

use crate::error::{CoreError, CoreResult};
use crate::ledger_table::LedgerTableName;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Ledger table used when neither the CLI nor the config file names one.
pub const DEFAULT_LEDGER_TABLE: &str = "waypoint_migrations";

/// Config file names looked up in the project directory, in order.
pub const CONFIG_FILE_NAMES: [&str; 2] = ["waypoint.yml", "waypoint.yaml"];

/// Project configuration from waypoint.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory holding `*_up.sql` / `*_down.sql` files, relative to the
    /// project directory
    #[serde(default = "default_migrations_path")]
    pub migrations_path: String,

    /// Database location (`:memory:` or a file path)
    #[serde(default)]
    pub database_url: Option<String>,

    /// Ledger table name
    #[serde(default)]
    pub table: LedgerTableName,

    /// Run each script and its ledger update in one transaction
    #[serde(default)]
    pub transactional: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            migrations_path: default_migrations_path(),
            database_url: None,
            table: LedgerTableName::default(),
            transactional: false,
        }
    }
}

fn default_migrations_path() -> String {
    "./".to_string()
}

impl Config {
    /// Load configuration from a specific file
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config =
            serde_yaml::from_str(&content).map_err(|e| CoreError::ConfigParseError {
                path: path.display().to_string(),
                source: e,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `waypoint.yml` (or `.yaml`) in `dir`
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        match Self::find_in_dir(dir) {
            Some(path) => Self::load(&path),
            None => Err(CoreError::ConfigNotFound {
                path: dir.join(CONFIG_FILE_NAMES[0]).display().to_string(),
            }),
        }
    }

    /// Load configuration from `dir` if a config file exists there,
    /// otherwise fall back to defaults
    pub fn load_or_default(dir: &Path) -> CoreResult<Self> {
        match Self::find_in_dir(dir) {
            Some(path) => {
                log::debug!("Loading config from {}", path.display());
                Self::load(&path)
            }
            None => Ok(Self::default()),
        }
    }

    fn find_in_dir(dir: &Path) -> Option<PathBuf> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|p| p.exists())
    }

    fn validate(&self) -> CoreResult<()> {
        if self.migrations_path.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "migrations_path must not be empty".to_string(),
            });
        }
        if matches!(&self.database_url, Some(url) if url.trim().is_empty()) {
            return Err(CoreError::ConfigInvalid {
                message: "database_url must not be empty when set".to_string(),
            });
        }
        Ok(())
    }

    /// Migrations directory resolved against `root`
    pub fn migrations_path_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.migrations_path)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
