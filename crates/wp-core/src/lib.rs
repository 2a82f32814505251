//! wp-core - Core library for Waypoint
//!
//! This crate provides the shared migration types, directory discovery of
//! migration units, the template generator behind `wp gen`, and parsing of
//! the optional `waypoint.yml` configuration file.

pub mod config;
pub mod discovery;
pub mod error;
pub mod ledger_table;
pub mod migration_id;
mod newtype_string;
pub mod scaffold;
pub mod unit;

pub use config::{Config, DEFAULT_LEDGER_TABLE};
pub use discovery::{check_identifier_widths, discover, DOWN_SUFFIX, UP_SUFFIX};
pub use error::{CoreError, CoreResult};
pub use ledger_table::LedgerTableName;
pub use migration_id::MigrationId;
pub use scaffold::{generate, timestamp_now, GeneratedFiles};
pub use unit::{Direction, MigrationScript, MigrationUnit};
