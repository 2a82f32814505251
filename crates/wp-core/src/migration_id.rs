//! Strongly-typed migration identifier.

use crate::newtype_string::define_newtype_string;

define_newtype_string! {
    /// Identifier of a migration unit: `<timestamp>_<name>`.
    ///
    /// Ordering is plain string comparison. Chronological order follows only
    /// while every timestamp prefix has the same width.
    pub struct MigrationId;
    validate = validate_migration_id;
}

fn validate_migration_id(s: &str) -> Result<(), &'static str> {
    if s.is_empty() {
        return Err("migration identifier must not be empty");
    }
    if s.contains('/') || s.contains('\\') {
        return Err("migration identifier must not contain path separators");
    }
    Ok(())
}

impl MigrationId {
    /// The run of leading ASCII digits, i.e. the timestamp prefix.
    pub fn timestamp_prefix(&self) -> &str {
        let end = self
            .as_str()
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(self.as_str().len());
        &self.as_str()[..end]
    }
}
