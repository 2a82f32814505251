//! Read-only view of which units are applied.

use crate::ledger::LedgerEntry;
use serde::Serialize;
use wp_core::MigrationId;

/// State of one discovered unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitStatus {
    pub id: MigrationId,
    /// Surrogate id of the ledger entry, when applied
    pub applied_id: Option<i64>,
    pub has_forward: bool,
    pub reversible: bool,
}

impl UnitStatus {
    pub fn is_applied(&self) -> bool {
        self.applied_id.is_some()
    }
}

/// Units on disk (ascending) and ledger entries with no unit on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub units: Vec<UnitStatus>,
    pub orphaned: Vec<LedgerEntry>,
}

impl StatusReport {
    pub fn applied_count(&self) -> usize {
        self.units.iter().filter(|u| u.is_applied()).count()
    }

    pub fn pending_count(&self) -> usize {
        self.units.len() - self.applied_count()
    }
}
