//! Migration unit types.

use crate::migration_id::MigrationId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Which way a run moves the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Run pending forward scripts, oldest first
    Apply,
    /// Run reverse scripts of applied units, newest first
    Revert,
}

impl Direction {
    /// File name suffix of the scripts that belong to this direction.
    pub fn suffix(self) -> &'static str {
        match self {
            Direction::Apply => crate::discovery::UP_SUFFIX,
            Direction::Revert => crate::discovery::DOWN_SUFFIX,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Apply => write!(f, "apply"),
            Direction::Revert => write!(f, "revert"),
        }
    }
}

/// One script file read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationScript {
    /// Where the script was read from
    pub path: PathBuf,
    /// Full statement text, executed verbatim
    pub sql: String,
}

impl MigrationScript {
    /// The script's file name, for progress output.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// A single schema change with optional forward and reverse scripts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationUnit {
    /// `<timestamp>_<name>`
    pub id: MigrationId,
    /// `_up.sql` script, if present
    pub forward: Option<MigrationScript>,
    /// `_down.sql` script, if present. A unit without one is irreversible.
    pub reverse: Option<MigrationScript>,
}

impl MigrationUnit {
    /// Create a unit with no scripts attached yet.
    pub fn new(id: MigrationId) -> Self {
        Self {
            id,
            forward: None,
            reverse: None,
        }
    }

    /// The script run for `direction`, if the unit has one.
    pub fn script(&self, direction: Direction) -> Option<&MigrationScript> {
        match direction {
            Direction::Apply => self.forward.as_ref(),
            Direction::Revert => self.reverse.as_ref(),
        }
    }

    /// Whether the unit can be reverted.
    pub fn is_reversible(&self) -> bool {
        self.reverse.is_some()
    }
}
