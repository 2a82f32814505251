//! Strongly-typed ledger table name.

use crate::newtype_string::define_newtype_string;

define_newtype_string! {
    /// Name of the table recording applied migrations.
    ///
    /// Operator supplied and substituted into ledger statements as-is, so it
    /// is only checked for being a single non-empty token.
    pub struct LedgerTableName;
    validate = validate_table_name;
}

fn validate_table_name(s: &str) -> Result<(), &'static str> {
    if s.is_empty() {
        return Err("ledger table name must not be empty");
    }
    if s.chars().any(char::is_whitespace) {
        return Err("ledger table name must not contain whitespace");
    }
    Ok(())
}

impl Default for LedgerTableName {
    fn default() -> Self {
        Self(crate::config::DEFAULT_LEDGER_TABLE.to_string())
    }
}
