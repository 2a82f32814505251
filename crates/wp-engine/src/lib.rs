//! wp-engine - Migration engine for Waypoint
//!
//! Discovers migration units, consults the ledger table to decide which of
//! them to run, and applies or reverts them strictly in order. Every step
//! returns a `Result`; the first failure ends the run.

pub mod engine;
pub mod error;
pub mod ledger;
pub mod sql;
pub mod status;

pub use engine::{apply_all, revert_all, Engine, EngineConfig, ProgressEvent, RunSummary};
pub use error::{EngineError, EngineResult, RunError};
pub use ledger::{Ledger, LedgerEntry};
pub use status::{StatusReport, UnitStatus};
