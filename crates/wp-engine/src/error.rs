//! Error types for the migration engine.

use thiserror::Error;
use wp_core::{CoreError, Direction, MigrationId};
use wp_db::DbError;

/// Why a run stopped.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Migrations directory or a script could not be read (M001).
    #[error("[M001] Migration discovery failed: {0}")]
    Discovery(#[from] CoreError),

    /// The store failed outside of a migration script (M002).
    #[error("[M002] Store unavailable{}: {source}", at_unit(.unit))]
    StoreUnavailable {
        unit: Option<MigrationId>,
        #[source]
        source: DbError,
    },

    /// A forward or reverse script was rejected by the store (M003).
    /// The ledger was not touched for this unit.
    #[error("[M003] {direction} script for '{unit}' failed: {source}")]
    ScriptExecution {
        unit: MigrationId,
        direction: Direction,
        #[source]
        source: DbError,
    },

    /// The script succeeded but the ledger update did not (M004). Schema
    /// and ledger now disagree and need manual reconciliation.
    #[error("[M004] Ledger out of sync for '{unit}': {}: {source}", hazard_detail(.direction))]
    LedgerConsistencyHazard {
        unit: MigrationId,
        direction: Direction,
        #[source]
        source: DbError,
    },

    /// A ledger entry already existed for a unit the engine had just
    /// applied (M005). Indicates a broken skip check or a concurrent run.
    #[error("[M005] Duplicate ledger entry for '{unit}' after its script ran: {source}")]
    DuplicateEntry {
        unit: MigrationId,
        #[source]
        source: DbError,
    },

    /// The unit is applied but has no reverse script (M006).
    #[error("[M006] Migration '{unit}' is applied but irreversible: no _down.sql script")]
    Irreversible { unit: MigrationId },

    /// The unit is pending but has no forward script (M007).
    #[error("[M007] Migration '{unit}' is pending but has no _up.sql script")]
    MissingForwardScript { unit: MigrationId },

    /// Transactional mode only: the ledger update failed and the script
    /// was rolled back with it (M008).
    #[error("[M008] Ledger update for '{unit}' failed during {direction}; script rolled back: {source}")]
    LedgerWriteRolledBack {
        unit: MigrationId,
        direction: Direction,
        #[source]
        source: DbError,
    },
}

fn at_unit(unit: &Option<MigrationId>) -> String {
    match unit {
        Some(id) => format!(" at '{id}'"),
        None => String::new(),
    }
}

fn hazard_detail(direction: &Direction) -> &'static str {
    match direction {
        Direction::Apply => "script applied but ledger entry was not recorded",
        Direction::Revert => "script reverted but ledger entry was not removed",
    }
}

impl EngineError {
    /// The unit being processed when the error occurred, if any.
    pub fn unit(&self) -> Option<&MigrationId> {
        match self {
            EngineError::Discovery(_) => None,
            EngineError::StoreUnavailable { unit, .. } => unit.as_ref(),
            EngineError::ScriptExecution { unit, .. }
            | EngineError::LedgerConsistencyHazard { unit, .. }
            | EngineError::DuplicateEntry { unit, .. }
            | EngineError::Irreversible { unit }
            | EngineError::MissingForwardScript { unit }
            | EngineError::LedgerWriteRolledBack { unit, .. } => Some(unit),
        }
    }

    /// Whether schema and ledger may now disagree.
    pub fn is_consistency_hazard(&self) -> bool {
        matches!(
            self,
            EngineError::LedgerConsistencyHazard { .. } | EngineError::DuplicateEntry { .. }
        )
    }
}

/// Result type alias for [`EngineError`].
pub type EngineResult<T> = Result<T, EngineError>;

/// A failed run: the error plus the units completed before it.
///
/// Completed units are not rolled back.
#[derive(Error, Debug)]
#[error("{direction} stopped after {} completed migration(s): {error}", .completed.len())]
pub struct RunError {
    pub direction: Direction,
    pub completed: Vec<MigrationId>,
    #[source]
    pub error: EngineError,
}

impl RunError {
    /// The unit at which processing stopped, if the failure was tied to one.
    pub fn failed_unit(&self) -> Option<&MigrationId> {
        self.error.unit()
    }
}
