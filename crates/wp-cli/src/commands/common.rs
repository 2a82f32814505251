//! Shared utilities for CLI commands

use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};
use wp_core::{Config, LedgerTableName};
use wp_db::DuckDbBackend;
use wp_engine::EngineConfig;

use crate::cli::{GlobalArgs, TargetArgs};

/// Settings after merging CLI flags, `DB_URL`, waypoint.yml and defaults.
#[derive(Debug, Clone)]
pub(crate) struct Resolved {
    pub migrations_dir: PathBuf,
    pub database_url: String,
    pub table: LedgerTableName,
    pub transactional: bool,
}

impl Resolved {
    pub(crate) fn engine_config(&self) -> EngineConfig {
        EngineConfig::new(&self.migrations_dir)
            .with_table(self.table.clone())
            .with_transactional(self.transactional)
    }
}

/// Load waypoint.yml from the project directory, or defaults if absent.
pub(crate) fn load_config(global: &GlobalArgs) -> Result<Config> {
    Config::load_or_default(&global.project_dir).context("Failed to load waypoint.yml")
}

/// Migrations directory: the `--path` flag as given, else `migrations_path`
/// relative to the project directory.
pub(crate) fn migrations_dir(flag: Option<&Path>, config: &Config, project_dir: &Path) -> PathBuf {
    match flag {
        Some(path) => path.to_path_buf(),
        None => config.migrations_path_absolute(project_dir),
    }
}

/// Merge target flags over the config file.
///
/// `target.url` already carries `DB_URL` when the flag is absent.
pub(crate) fn resolve(
    target: &TargetArgs,
    transactional: bool,
    config: &Config,
    project_dir: &Path,
) -> Result<Resolved> {
    let database_url = target
        .url
        .clone()
        .or_else(|| config.database_url.clone())
        .ok_or_else(|| {
            anyhow!("No database given: pass --url, set DB_URL, or set database_url in waypoint.yml")
        })?;

    let table = match &target.table {
        Some(name) => LedgerTableName::try_new(name.as_str())
            .map_err(|reason| anyhow!("Invalid ledger table name '{name}': {reason}"))?,
        None => config.table.clone(),
    };

    Ok(Resolved {
        migrations_dir: migrations_dir(target.path.as_deref(), config, project_dir),
        database_url,
        table,
        transactional: transactional || config.transactional,
    })
}

/// Open the database named by `url`.
pub(crate) fn connect(url: &str) -> Result<DuckDbBackend> {
    log::debug!("Connecting to {url}");
    DuckDbBackend::new(url).with_context(|| format!("Failed to connect to database: {url}"))
}

#[cfg(test)]
#[path = "common_test.rs"]
mod tests;
