//! Ledger of applied migrations.
//!
//! One row per applied unit: a store-assigned surrogate id (from a sequence,
//! so it grows with insertion order) and the unit's identifier.

use crate::error::{EngineError, EngineResult};
use crate::sql::{self, render};
use serde::Serialize;
use wp_core::{LedgerTableName, MigrationId};
use wp_db::{Database, DbResult, SqlValue};

/// A recorded application of a migration unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerEntry {
    pub surrogate_id: i64,
    pub migration_id: MigrationId,
}

/// Ledger operations against one table.
pub struct Ledger<'a> {
    db: &'a dyn Database,
    table: &'a LedgerTableName,
}

impl<'a> Ledger<'a> {
    pub fn new(db: &'a dyn Database, table: &'a LedgerTableName) -> Self {
        Self { db, table }
    }

    pub fn table(&self) -> &LedgerTableName {
        self.table
    }

    /// Create the ledger table unless it already exists.
    ///
    /// Existence is probed on every call; nothing is cached between runs.
    pub async fn ensure_table(&self) -> EngineResult<()> {
        let exists = self
            .db
            .relation_exists(self.table.as_str())
            .await
            .map_err(store_unavailable)?;
        if exists {
            log::debug!("Ledger table {} present", self.table);
            return Ok(());
        }

        log::info!("Creating ledger table {}", self.table);
        self.db
            .execute_batch(&render(sql::CREATE_LEDGER_TABLE, self.table))
            .await
            .map_err(store_unavailable)
    }

    /// Surrogate id of the entry for `id`, or `None` if it was never applied.
    pub async fn find_entry(&self, id: &MigrationId) -> DbResult<Option<i64>> {
        self.db
            .query_optional_i64(
                &render(sql::FIND_ENTRY, self.table),
                &[SqlValue::from(id.as_str())],
            )
            .await
    }

    /// Record `id` as applied.
    pub async fn insert_entry(&self, id: &MigrationId) -> DbResult<()> {
        self.db
            .execute_params(
                &render(sql::INSERT_ENTRY, self.table),
                &[SqlValue::from(id.as_str())],
            )
            .await?;
        Ok(())
    }

    /// Remove the entry with `surrogate_id`.
    pub async fn delete_entry(&self, surrogate_id: i64) -> DbResult<()> {
        self.db
            .execute_params(
                &render(sql::DELETE_ENTRY, self.table),
                &[SqlValue::from(surrogate_id)],
            )
            .await?;
        Ok(())
    }

    /// All entries in insertion order.
    pub async fn entries(&self) -> EngineResult<Vec<LedgerEntry>> {
        let rows = self
            .db
            .query_pairs(&render(sql::LIST_ENTRIES, self.table))
            .await
            .map_err(store_unavailable)?;

        let mut entries = Vec::with_capacity(rows.len());
        for (surrogate_id, name) in rows {
            match MigrationId::try_new(name) {
                Ok(migration_id) => entries.push(LedgerEntry {
                    surrogate_id,
                    migration_id,
                }),
                Err(reason) => {
                    log::warn!("Ignoring ledger row {surrogate_id} in {}: {reason}", self.table)
                }
            }
        }
        Ok(entries)
    }
}

fn store_unavailable(source: wp_db::DbError) -> EngineError {
    EngineError::StoreUnavailable { unit: None, source }
}

#[cfg(test)]
#[path = "ledger_test.rs"]
mod tests;
