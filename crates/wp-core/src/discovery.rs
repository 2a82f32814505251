//! Discovery of migration units in a directory.
//!
//! A unit is the pair `<id>_up.sql` / `<id>_down.sql`. Both halves are
//! optional; every script found is read eagerly so that an unreadable file
//! fails the run before any unit is processed.

use crate::error::{CoreError, CoreResult};
use crate::migration_id::MigrationId;
use crate::unit::{Direction, MigrationScript, MigrationUnit};
use std::collections::BTreeMap;
use std::path::Path;

/// File name suffix of forward scripts.
pub const UP_SUFFIX: &str = "_up.sql";

/// File name suffix of reverse scripts.
pub const DOWN_SUFFIX: &str = "_down.sql";

/// Discover all migration units under `dir`, ordered for `direction`.
///
/// Apply order is ascending by identifier, revert order is descending.
/// Only the top level of `dir` is scanned; sub-directories and files
/// without a recognised suffix are ignored.
pub fn discover(dir: &Path, direction: Direction) -> CoreResult<Vec<MigrationUnit>> {
    let unreadable_dir = |source| CoreError::DirectoryUnreadable {
        path: dir.display().to_string(),
        source,
    };

    let mut units: BTreeMap<MigrationId, MigrationUnit> = BTreeMap::new();

    for entry in std::fs::read_dir(dir).map_err(unreadable_dir)? {
        let entry = entry.map_err(unreadable_dir)?;
        let path = entry.path();

        if entry.file_type().map_err(unreadable_dir)?.is_dir() {
            continue;
        }

        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            log::debug!("Skipping non UTF-8 file name: {}", path.display());
            continue;
        };

        let (base, is_forward) = if let Some(base) = file_name.strip_suffix(UP_SUFFIX) {
            (base, true)
        } else if let Some(base) = file_name.strip_suffix(DOWN_SUFFIX) {
            (base, false)
        } else {
            continue;
        };

        let Ok(id) = MigrationId::try_new(base) else {
            log::debug!("Skipping script with empty identifier: {}", path.display());
            continue;
        };

        let sql = std::fs::read_to_string(&path).map_err(|source| CoreError::ScriptUnreadable {
            path: path.display().to_string(),
            source,
        })?;
        let script = MigrationScript { path, sql };

        let unit = units
            .entry(id.clone())
            .or_insert_with(|| MigrationUnit::new(id));
        if is_forward {
            unit.forward = Some(script);
        } else {
            unit.reverse = Some(script);
        }
    }

    let mut ordered: Vec<MigrationUnit> = units.into_values().collect();
    if direction == Direction::Revert {
        ordered.reverse();
    }

    log::debug!(
        "Discovered {} migration unit(s) in {} for {}",
        ordered.len(),
        dir.display(),
        direction
    );
    Ok(ordered)
}

/// Return the identifiers whose timestamp prefix width differs from the
/// first unit's.
///
/// String ordering only matches chronological ordering while every prefix
/// has the same width, so mismatches are worth surfacing to the operator.
pub fn check_identifier_widths(units: &[MigrationUnit]) -> Vec<&MigrationId> {
    let Some(first) = units.first() else {
        return Vec::new();
    };
    let expected = first.id.timestamp_prefix().len();
    units
        .iter()
        .filter(|u| u.id.timestamp_prefix().len() != expected)
        .map(|u| &u.id)
        .collect()
}

#[cfg(test)]
#[path = "discovery_test.rs"]
mod tests;
