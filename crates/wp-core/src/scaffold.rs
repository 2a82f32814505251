//! Template generator for new migration units (`wp gen`).

use crate::discovery::{DOWN_SUFFIX, UP_SUFFIX};
use crate::error::{CoreError, CoreResult};
use chrono::{DateTime, Utc};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Timestamp layout used as the identifier prefix (14 digits, UTC).
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

const UP_TEMPLATE: &str = "-- Write your UP migration SQL here.\n";
const DOWN_TEMPLATE: &str = "-- Write your DOWN migration SQL here.\n";

/// Paths of a freshly generated unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFiles {
    pub up: PathBuf,
    pub down: PathBuf,
}

/// Current UTC time formatted as an identifier prefix.
pub fn timestamp_now() -> String {
    format_timestamp(Utc::now())
}

/// Format `at` as an identifier prefix.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Write an empty up/down pair named `<timestamp>_<name>` into `dir`.
///
/// Existing files are never overwritten.
pub fn generate(dir: &Path, name: &str, timestamp: &str) -> CoreResult<GeneratedFiles> {
    validate_name(name)?;

    let base = format!("{timestamp}_{name}");
    let files = GeneratedFiles {
        up: dir.join(format!("{base}{UP_SUFFIX}")),
        down: dir.join(format!("{base}{DOWN_SUFFIX}")),
    };

    for path in [&files.up, &files.down] {
        if path.exists() {
            return Err(CoreError::MigrationFileExists {
                path: path.display().to_string(),
            });
        }
    }

    std::fs::create_dir_all(dir).map_err(|source| CoreError::IoWithPath {
        path: dir.display().to_string(),
        source,
    })?;
    write_new(&files.up, UP_TEMPLATE)?;
    write_new(&files.down, DOWN_TEMPLATE)?;

    log::debug!("Generated migration {base} in {}", dir.display());
    Ok(files)
}

fn validate_name(name: &str) -> CoreResult<()> {
    let reason = if name.is_empty() {
        Some("must not be empty")
    } else if name.contains('/') || name.contains('\\') || name.contains("..") {
        Some("must not contain '/', '\\', or '..'")
    } else if name.chars().any(char::is_whitespace) {
        Some("must not contain whitespace")
    } else if name.ends_with("_up") || name.ends_with("_down") {
        Some("must not end with '_up' or '_down'")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(CoreError::InvalidMigrationName {
            name: name.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

fn write_new(path: &Path, content: &str) -> CoreResult<()> {
    let io_err = |source| CoreError::IoWithPath {
        path: path.display().to_string(),
        source,
    };
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(io_err)?;
    file.write_all(content.as_bytes()).map_err(io_err)
}

#[cfg(test)]
#[path = "scaffold_test.rs"]
mod tests;
