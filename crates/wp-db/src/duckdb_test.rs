use super::*;

#[tokio::test]
async fn test_in_memory() {
    let db = DuckDbBackend::in_memory().unwrap();
    assert_eq!(db.db_type(), "duckdb");
}

#[tokio::test]
async fn test_new_memory_special_case() {
    let db = DuckDbBackend::new(":memory:").unwrap();
    assert!(!db.relation_exists("anything").await.unwrap());
}

#[tokio::test]
async fn test_from_path_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.duckdb");
    {
        let db = DuckDbBackend::from_path(&path).unwrap();
        db.execute_batch("CREATE TABLE kept (id INT)").await.unwrap();
    }
    let db = DuckDbBackend::from_path(&path).unwrap();
    assert!(db.relation_exists("kept").await.unwrap());
}

#[tokio::test]
async fn test_execute_batch_multiple_statements() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute_batch(
        "CREATE TABLE t1 (id INT); CREATE TABLE t2 (id INT); INSERT INTO t1 VALUES (1);",
    )
    .await
    .unwrap();

    assert!(db.relation_exists("t1").await.unwrap());
    assert!(db.relation_exists("t2").await.unwrap());
}

#[tokio::test]
async fn test_execute_returns_affected_rows() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute_batch("CREATE TABLE nums (n INT)").await.unwrap();

    let affected = db
        .execute("INSERT INTO nums VALUES (1), (2), (3)")
        .await
        .unwrap();

    assert_eq!(affected, 3);
}

#[tokio::test]
async fn test_execute_params_binds_text_verbatim() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute_batch("CREATE TABLE names (id BIGINT, name VARCHAR)")
        .await
        .unwrap();

    let tricky = "x'); DROP TABLE names; --";
    db.execute_params(
        "INSERT INTO names VALUES (?, ?)",
        &[SqlValue::from(1_i64), SqlValue::from(tricky)],
    )
    .await
    .unwrap();

    let pairs = db.query_pairs("SELECT id, name FROM names").await.unwrap();
    assert_eq!(pairs, vec![(1, tricky.to_string())]);
}

#[tokio::test]
async fn test_query_optional_i64_found_and_missing() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute_batch("CREATE TABLE kv (k VARCHAR, v BIGINT); INSERT INTO kv VALUES ('a', 7);")
        .await
        .unwrap();

    let found = db
        .query_optional_i64("SELECT v FROM kv WHERE k = ?", &[SqlValue::from("a")])
        .await
        .unwrap();
    let missing = db
        .query_optional_i64("SELECT v FROM kv WHERE k = ?", &[SqlValue::from("b")])
        .await
        .unwrap();

    assert_eq!(found, Some(7));
    assert_eq!(missing, None);
}

#[tokio::test]
async fn test_relation_exists_schema_qualified() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute_batch("CREATE SCHEMA ops; CREATE TABLE ops.ledger (id INT)")
        .await
        .unwrap();

    assert!(db.relation_exists("ops.ledger").await.unwrap());
    assert!(!db.relation_exists("ledger").await.unwrap());
}

#[tokio::test]
async fn test_unique_violation_is_classified() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute_batch("CREATE TABLE u (name VARCHAR UNIQUE); INSERT INTO u VALUES ('a');")
        .await
        .unwrap();

    let err = db
        .execute_params("INSERT INTO u VALUES (?)", &[SqlValue::from("a")])
        .await
        .unwrap_err();

    assert!(matches!(err, DbError::ConstraintViolation(_)), "{err}");
}

#[tokio::test]
async fn test_invalid_statement_is_execution_error() {
    let db = DuckDbBackend::in_memory().unwrap();
    let err = db.execute_batch("CREATE TABEL oops (id INT)").await.unwrap_err();
    assert!(matches!(err, DbError::ExecutionError(_)), "{err}");
}

#[tokio::test]
async fn test_missing_table_is_classified() {
    let db = DuckDbBackend::in_memory().unwrap();
    let err = db.execute("DELETE FROM nowhere").await.unwrap_err();
    assert!(matches!(err, DbError::TableNotFound(_)), "{err}");
}
