//! Ledger statement templates.
//!
//! Each template is embedded via `include_str!` and carries one placeholder,
//! `{table}`, filled in by [`render`]. Migration identifiers and ledger ids
//! are bound as `?` parameters, never rendered into the text.

use wp_core::LedgerTableName;

/// Placeholder replaced by the ledger table name.
pub const TABLE_PLACEHOLDER: &str = "{table}";

/// Sequence + table DDL for the ledger.
pub const CREATE_LEDGER_TABLE: &str = include_str!("create_ledger_table.sql");

/// Look up the surrogate id of an entry by migration identifier.
pub const FIND_ENTRY: &str = include_str!("find_entry.sql");

/// Record an applied migration.
pub const INSERT_ENTRY: &str = include_str!("insert_entry.sql");

/// Remove an entry by surrogate id.
pub const DELETE_ENTRY: &str = include_str!("delete_entry.sql");

/// All entries in insertion order.
pub const LIST_ENTRIES: &str = include_str!("list_entries.sql");

/// Substitute the ledger table name into `template`.
///
/// Plain text replacement with no quoting. The table name comes from the
/// operator, not from migration files.
pub fn render(template: &str, table: &LedgerTableName) -> String {
    template.replace(TABLE_PLACEHOLDER, table.as_str())
}
