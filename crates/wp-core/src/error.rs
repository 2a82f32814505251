//! Error types for wp-core

use thiserror::Error;

/// Core error type for Waypoint
#[derive(Error, Debug)]
pub enum CoreError {
    /// W001: Migrations directory cannot be listed
    #[error("[W001] Cannot read migrations directory '{path}': {source}")]
    DirectoryUnreadable {
        path: String,
        source: std::io::Error,
    },

    /// W002: A migration script cannot be read
    #[error("[W002] Cannot read migration script '{path}': {source}")]
    ScriptUnreadable {
        path: String,
        source: std::io::Error,
    },

    /// W003: Configuration file not found
    #[error("[W003] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// W004: Failed to parse configuration file
    #[error("[W004] Failed to parse config '{path}': {source}")]
    ConfigParseError {
        path: String,
        source: serde_yaml::Error,
    },

    /// W005: Invalid configuration value
    #[error("[W005] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// W006: Migration name rejected by the generator
    #[error("[W006] Invalid migration name '{name}': {reason}")]
    InvalidMigrationName { name: String, reason: String },

    /// W007: Generator would overwrite an existing file
    #[error("[W007] Migration file already exists: {path}")]
    MigrationFileExists { path: String },

    /// W008: IO error with file path context
    #[error("[W008] IO error on '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },
}

impl CoreError {
    /// True for the errors that make up the discovery class: the directory
    /// could not be listed or a script could not be read.
    pub fn is_discovery(&self) -> bool {
        matches!(
            self,
            CoreError::DirectoryUnreadable { .. } | CoreError::ScriptUnreadable { .. }
        )
    }
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
