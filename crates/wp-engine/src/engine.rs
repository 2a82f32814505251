//! Migration engine: ordered apply/revert with ledger bookkeeping.
//!
//! Units are processed one at a time in discovery order. For each unit the
//! engine consults the ledger, runs the script for the run's direction, and
//! then inserts or deletes the ledger entry. The first failure ends the run;
//! units completed before it stay completed.

use crate::error::{EngineError, EngineResult, RunError};
use crate::ledger::Ledger;
use crate::status::{StatusReport, UnitStatus};
use std::collections::HashSet;
use std::path::PathBuf;
use wp_core::{
    check_identifier_widths, discover, Direction, LedgerTableName, MigrationId, MigrationScript,
    MigrationUnit,
};
use wp_db::{Database, DbError};

/// Read-only settings for one engine run.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Directory scanned for `*_up.sql` / `*_down.sql`
    pub migrations_dir: PathBuf,
    /// Ledger table name
    pub table: LedgerTableName,
    /// Wrap each script and its ledger update in one transaction
    pub transactional: bool,
}

impl EngineConfig {
    pub fn new(migrations_dir: impl Into<PathBuf>) -> Self {
        Self {
            migrations_dir: migrations_dir.into(),
            table: LedgerTableName::default(),
            transactional: false,
        }
    }

    pub fn with_table(mut self, table: LedgerTableName) -> Self {
        self.table = table;
        self
    }

    pub fn with_transactional(mut self, transactional: bool) -> Self {
        self.transactional = transactional;
        self
    }
}

/// Per-unit progress notifications.
#[derive(Debug, Clone, Copy)]
pub enum ProgressEvent<'u> {
    /// The script for `direction` is about to run
    Started {
        unit: &'u MigrationUnit,
        script: &'u MigrationScript,
        direction: Direction,
    },
    /// Nothing to do for this unit
    Skipped {
        unit: &'u MigrationUnit,
        direction: Direction,
    },
    /// Script ran and the ledger was updated
    Completed {
        unit: &'u MigrationUnit,
        direction: Direction,
    },
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub direction: Direction,
    /// Units applied or reverted, in processing order
    pub completed: Vec<MigrationId>,
    /// Units left alone, in processing order
    pub skipped: Vec<MigrationId>,
}

impl RunSummary {
    fn new(direction: Direction) -> Self {
        Self {
            direction,
            completed: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Number of units applied or reverted.
    pub fn count(&self) -> usize {
        self.completed.len()
    }
}

enum UnitOutcome {
    Completed,
    Skipped,
}

/// Ledger mutation that follows a successful script.
#[derive(Clone, Copy)]
enum LedgerStep {
    Insert,
    Delete(i64),
}

type ProgressFn<'a> = Box<dyn Fn(&ProgressEvent<'_>) + Send + Sync + 'a>;

/// Applies or reverts migration units against a [`Database`].
pub struct Engine<'a> {
    db: &'a dyn Database,
    config: EngineConfig,
    progress: Option<ProgressFn<'a>>,
}

impl<'a> Engine<'a> {
    pub fn new(db: &'a dyn Database, config: EngineConfig) -> Self {
        Self {
            db,
            config,
            progress: None,
        }
    }

    /// Register a callback invoked for every unit as it is processed.
    pub fn on_progress(mut self, f: impl Fn(&ProgressEvent<'_>) + Send + Sync + 'a) -> Self {
        self.progress = Some(Box::new(f));
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn ledger(&self) -> Ledger<'_> {
        Ledger::new(self.db, &self.config.table)
    }

    fn notify(&self, event: ProgressEvent<'_>) {
        if let Some(f) = &self.progress {
            f(&event);
        }
    }

    /// Apply every pending unit, oldest first.
    pub async fn apply_all(&self) -> Result<RunSummary, RunError> {
        self.run(Direction::Apply).await
    }

    /// Revert every applied unit, newest first.
    pub async fn revert_all(&self) -> Result<RunSummary, RunError> {
        self.run(Direction::Revert).await
    }

    /// Process all discovered units in `direction`.
    pub async fn run(&self, direction: Direction) -> Result<RunSummary, RunError> {
        let mut summary = RunSummary::new(direction);
        match self.run_inner(direction, &mut summary).await {
            Ok(()) => Ok(summary),
            Err(error) => {
                log::error!("{direction} run stopped: {error}");
                Err(RunError {
                    direction,
                    completed: summary.completed,
                    error,
                })
            }
        }
    }

    async fn run_inner(&self, direction: Direction, summary: &mut RunSummary) -> EngineResult<()> {
        let ledger = self.ledger();
        ledger.ensure_table().await?;

        let units = discover(&self.config.migrations_dir, direction)?;
        for id in check_identifier_widths(&units) {
            log::warn!(
                "Migration '{id}' has a timestamp prefix of a different width; \
                 ordering is by plain string comparison"
            );
        }

        for unit in &units {
            let outcome = match direction {
                Direction::Apply => self.apply_unit(&ledger, unit).await?,
                Direction::Revert => self.revert_unit(&ledger, unit).await?,
            };
            match outcome {
                UnitOutcome::Completed => {
                    self.notify(ProgressEvent::Completed { unit, direction });
                    summary.completed.push(unit.id.clone());
                }
                UnitOutcome::Skipped => {
                    self.notify(ProgressEvent::Skipped { unit, direction });
                    summary.skipped.push(unit.id.clone());
                }
            }
        }
        Ok(())
    }

    async fn apply_unit(&self, ledger: &Ledger<'_>, unit: &MigrationUnit) -> EngineResult<UnitOutcome> {
        let existing = ledger
            .find_entry(&unit.id)
            .await
            .map_err(|source| unavailable_at(unit, source))?;
        if existing.is_some() {
            log::debug!("Skipping {}: already applied", unit.id);
            return Ok(UnitOutcome::Skipped);
        }

        let Some(script) = &unit.forward else {
            return Err(EngineError::MissingForwardScript {
                unit: unit.id.clone(),
            });
        };

        self.execute_step(ledger, unit, script, Direction::Apply, LedgerStep::Insert)
            .await?;
        log::info!("Applied {}", unit.id);
        Ok(UnitOutcome::Completed)
    }

    async fn revert_unit(&self, ledger: &Ledger<'_>, unit: &MigrationUnit) -> EngineResult<UnitOutcome> {
        let existing = ledger
            .find_entry(&unit.id)
            .await
            .map_err(|source| unavailable_at(unit, source))?;

        // Non-positive ids count as not applied.
        let surrogate_id = match existing {
            Some(id) if id > 0 => id,
            _ => {
                log::debug!("Skipping {}: not applied", unit.id);
                return Ok(UnitOutcome::Skipped);
            }
        };

        let Some(script) = &unit.reverse else {
            return Err(EngineError::Irreversible {
                unit: unit.id.clone(),
            });
        };

        self.execute_step(
            ledger,
            unit,
            script,
            Direction::Revert,
            LedgerStep::Delete(surrogate_id),
        )
        .await?;
        log::info!("Reverted {}", unit.id);
        Ok(UnitOutcome::Completed)
    }

    /// Run `script`, then apply `step` to the ledger.
    async fn execute_step(
        &self,
        ledger: &Ledger<'_>,
        unit: &MigrationUnit,
        script: &MigrationScript,
        direction: Direction,
        step: LedgerStep,
    ) -> EngineResult<()> {
        let transactional = self.config.transactional;
        self.notify(ProgressEvent::Started {
            unit,
            script,
            direction,
        });

        if transactional {
            self.db
                .execute_batch("BEGIN TRANSACTION")
                .await
                .map_err(|source| unavailable_at(unit, source))?;
        }

        log::debug!("Executing {}", script.path.display());
        if let Err(source) = self.db.execute_batch(&script.sql).await {
            if transactional {
                self.rollback(unit).await;
            }
            return Err(EngineError::ScriptExecution {
                unit: unit.id.clone(),
                direction,
                source,
            });
        }

        let recorded = match step {
            LedgerStep::Insert => ledger.insert_entry(&unit.id).await,
            LedgerStep::Delete(surrogate_id) => ledger.delete_entry(surrogate_id).await,
        };

        if let Err(source) = recorded {
            let rolled_back = transactional && self.rollback(unit).await;
            return Err(self.ledger_failure(unit, direction, step, source, rolled_back));
        }

        if transactional {
            if let Err(source) = self.db.execute_batch("COMMIT").await {
                self.rollback(unit).await;
                return Err(unavailable_at(unit, source));
            }
        }
        Ok(())
    }

    /// Roll back the open transaction; returns whether that succeeded.
    async fn rollback(&self, unit: &MigrationUnit) -> bool {
        match self.db.execute_batch("ROLLBACK").await {
            Ok(()) => true,
            Err(e) => {
                log::error!("ROLLBACK failed while processing {}: {e}", unit.id);
                false
            }
        }
    }

    fn ledger_failure(
        &self,
        unit: &MigrationUnit,
        direction: Direction,
        step: LedgerStep,
        source: DbError,
        rolled_back: bool,
    ) -> EngineError {
        let unit = unit.id.clone();
        if rolled_back {
            return EngineError::LedgerWriteRolledBack {
                unit,
                direction,
                source,
            };
        }
        let error = match (step, source) {
            (LedgerStep::Insert, source @ DbError::ConstraintViolation(_)) => {
                EngineError::DuplicateEntry { unit, source }
            }
            (_, source) => EngineError::LedgerConsistencyHazard {
                unit,
                direction,
                source,
            },
        };
        log::error!("{error}");
        error
    }

    /// Applied/pending state of every discovered unit, plus ledger entries
    /// whose unit is no longer on disk.
    pub async fn status(&self) -> EngineResult<StatusReport> {
        let ledger = self.ledger();
        ledger.ensure_table().await?;

        let units = discover(&self.config.migrations_dir, Direction::Apply)?;
        let entries = ledger.entries().await?;

        let on_disk: HashSet<&str> = units.iter().map(|u| u.id.as_str()).collect();
        let statuses = units
            .iter()
            .map(|unit| UnitStatus {
                id: unit.id.clone(),
                applied_id: entries
                    .iter()
                    .find(|e| e.migration_id == unit.id)
                    .map(|e| e.surrogate_id),
                has_forward: unit.forward.is_some(),
                reversible: unit.is_reversible(),
            })
            .collect();

        let orphaned: Vec<_> = entries
            .into_iter()
            .filter(|e| !on_disk.contains(e.migration_id.as_str()))
            .collect();
        for entry in &orphaned {
            log::warn!(
                "Ledger entry '{}' has no migration files in {}",
                entry.migration_id,
                self.config.migrations_dir.display()
            );
        }

        Ok(StatusReport {
            units: statuses,
            orphaned,
        })
    }
}

fn unavailable_at(unit: &MigrationUnit, source: DbError) -> EngineError {
    EngineError::StoreUnavailable {
        unit: Some(unit.id.clone()),
        source,
    }
}

/// Apply every pending unit under `config.migrations_dir`.
pub async fn apply_all(db: &dyn Database, config: &EngineConfig) -> Result<RunSummary, RunError> {
    Engine::new(db, config.clone()).apply_all().await
}

/// Revert every applied unit under `config.migrations_dir`.
pub async fn revert_all(db: &dyn Database, config: &EngineConfig) -> Result<RunSummary, RunError> {
    Engine::new(db, config.clone()).revert_all().await
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod tests;
