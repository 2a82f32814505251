//! Database trait definition

use crate::error::DbResult;
use crate::value::SqlValue;
use async_trait::async_trait;

/// Statement executor the migration engine runs against.
///
/// Implementations must be Send + Sync for async operation. Every call is
/// awaited to completion before the engine issues the next one.
#[async_trait]
pub trait Database: Send + Sync {
    /// Execute a single statement, returns affected rows
    async fn execute(&self, sql: &str) -> DbResult<usize>;

    /// Execute a script of one or more statements
    async fn execute_batch(&self, sql: &str) -> DbResult<()>;

    /// Execute a single statement with bound parameters, returns affected rows
    async fn execute_params(&self, sql: &str, params: &[SqlValue]) -> DbResult<usize>;

    /// Query the first column of the first row as an integer.
    ///
    /// Returns `Ok(None)` when the query yields no rows.
    async fn query_optional_i64(&self, sql: &str, params: &[SqlValue])
        -> DbResult<Option<i64>>;

    /// Query `(integer, text)` pairs from the first two columns
    async fn query_pairs(&self, sql: &str) -> DbResult<Vec<(i64, String)>>;

    /// Check if a table or view exists
    async fn relation_exists(&self, name: &str) -> DbResult<bool>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;
}
