//! Bound statement parameters.

/// A value bound to a `?` placeholder.
///
/// Migration identifiers and ledger ids always travel as `SqlValue`s and
/// are never spliced into statement text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    Text(String),
    Integer(i64),
}

impl From<&str> for SqlValue {
    fn from(s: &str) -> Self {
        SqlValue::Text(s.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(s: String) -> Self {
        SqlValue::Text(s)
    }
}

impl From<i64> for SqlValue {
    fn from(n: i64) -> Self {
        SqlValue::Integer(n)
    }
}

impl From<&SqlValue> for duckdb::types::Value {
    fn from(v: &SqlValue) -> Self {
        match v {
            SqlValue::Text(s) => duckdb::types::Value::Text(s.clone()),
            SqlValue::Integer(n) => duckdb::types::Value::BigInt(*n),
        }
    }
}
