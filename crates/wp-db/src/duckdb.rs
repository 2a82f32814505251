//! DuckDB database backend implementation

use crate::error::{DbError, DbResult};
use crate::traits::Database;
use crate::value::SqlValue;
use async_trait::async_trait;
use duckdb::{params_from_iter, Connection};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// DuckDB database backend
///
/// Owns a single connection. A run of the migration engine holds the
/// backend exclusively; it is not meant to be shared between runs.
pub struct DuckDbBackend {
    conn: Mutex<Connection>,
}

impl DuckDbBackend {
    /// Create a new in-memory DuckDB connection
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create a new DuckDB connection from a file path
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| DbError::ConnectionError(format!("{e}: {}", path.display())))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create from path string (handles :memory: special case)
    pub fn new(path: &str) -> DbResult<Self> {
        if path == ":memory:" {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(path))
        }
    }

    fn lock(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| DbError::MutexPoisoned(e.to_string()))
    }

    fn execute_sync(&self, sql: &str, params: &[SqlValue]) -> DbResult<usize> {
        let conn = self.lock()?;
        let values: Vec<duckdb::types::Value> = params.iter().map(Into::into).collect();
        Ok(conn.execute(sql, params_from_iter(values))?)
    }

    fn execute_batch_sync(&self, sql: &str) -> DbResult<()> {
        let conn = self.lock()?;
        Ok(conn.execute_batch(sql)?)
    }

    fn query_optional_i64_sync(&self, sql: &str, params: &[SqlValue]) -> DbResult<Option<i64>> {
        let conn = self.lock()?;
        let values: Vec<duckdb::types::Value> = params.iter().map(Into::into).collect();
        match conn.query_row(sql, params_from_iter(values), |row| row.get::<_, i64>(0)) {
            Ok(v) => Ok(Some(v)),
            Err(duckdb::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn query_pairs_sync(&self, sql: &str) -> DbResult<Vec<(i64, String)>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))?;
        let mut pairs = Vec::new();
        for row in rows {
            pairs.push(row?);
        }
        Ok(pairs)
    }

    fn relation_exists_sync(&self, name: &str) -> DbResult<bool> {
        // Handle schema-qualified names
        let (schema, table) = match name.rfind('.') {
            Some(pos) => (&name[..pos], &name[pos + 1..]),
            None => ("main", name),
        };

        let count = self.query_optional_i64_sync(
            "SELECT COUNT(*) FROM information_schema.tables WHERE table_schema = ? AND table_name = ?",
            &[SqlValue::from(schema), SqlValue::from(table)],
        )?;
        Ok(count.unwrap_or(0) > 0)
    }
}

#[async_trait]
impl Database for DuckDbBackend {
    async fn execute(&self, sql: &str) -> DbResult<usize> {
        self.execute_sync(sql, &[])
    }

    async fn execute_batch(&self, sql: &str) -> DbResult<()> {
        self.execute_batch_sync(sql)
    }

    async fn execute_params(&self, sql: &str, params: &[SqlValue]) -> DbResult<usize> {
        self.execute_sync(sql, params)
    }

    async fn query_optional_i64(
        &self,
        sql: &str,
        params: &[SqlValue],
    ) -> DbResult<Option<i64>> {
        self.query_optional_i64_sync(sql, params)
    }

    async fn query_pairs(&self, sql: &str) -> DbResult<Vec<(i64, String)>> {
        self.query_pairs_sync(sql)
    }

    async fn relation_exists(&self, name: &str) -> DbResult<bool> {
        self.relation_exists_sync(name)
    }

    fn db_type(&self) -> &'static str {
        "duckdb"
    }
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
