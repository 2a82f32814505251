//! Integration tests running the engine against an on-disk DuckDB file

use std::path::Path;
use tempfile::TempDir;
use wp_core::{Direction, LedgerTableName};
use wp_db::{Database, DuckDbBackend};
use wp_engine::{Engine, EngineConfig, EngineError, Ledger};

fn project_with_units() -> TempDir {
    let dir = TempDir::new().unwrap();
    let migrations = dir.path().join("migrations");
    std::fs::create_dir(&migrations).unwrap();
    let units = [
        (
            "20240101000000_init",
            "CREATE TABLE users (id INTEGER PRIMARY KEY, name VARCHAR);",
            "DROP TABLE users;",
        ),
        (
            "20240102000000_add_col",
            "ALTER TABLE users ADD COLUMN email VARCHAR;",
            "ALTER TABLE users DROP COLUMN email;",
        ),
        (
            "20240103000000_seed",
            "INSERT INTO users (id, name, email) VALUES (1, 'ada', 'ada@example.com');",
            "DELETE FROM users WHERE id = 1;",
        ),
    ];
    for (id, up, down) in units {
        std::fs::write(migrations.join(format!("{id}_up.sql")), up).unwrap();
        std::fs::write(migrations.join(format!("{id}_down.sql")), down).unwrap();
    }
    dir
}

async fn applied(db: &dyn Database) -> Vec<String> {
    let table = LedgerTableName::default();
    Ledger::new(db, &table)
        .entries()
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.migration_id.into_inner())
        .collect()
}

fn open(path: &Path) -> DuckDbBackend {
    DuckDbBackend::from_path(path).unwrap()
}

#[tokio::test]
async fn test_ledger_survives_reconnect() {
    let project = project_with_units();
    let db_path = project.path().join("app.duckdb");
    let config = EngineConfig::new(project.path().join("migrations"));

    {
        let db = open(&db_path);
        let summary = Engine::new(&db, config.clone()).apply_all().await.unwrap();
        assert_eq!(summary.count(), 3);
    }

    let db = open(&db_path);
    let summary = Engine::new(&db, config.clone()).apply_all().await.unwrap();
    assert_eq!(summary.count(), 0);
    assert_eq!(summary.skipped.len(), 3);
    assert_eq!(
        applied(&db).await,
        vec![
            "20240101000000_init",
            "20240102000000_add_col",
            "20240103000000_seed"
        ]
    );
}

#[tokio::test]
async fn test_full_cycle_leaves_empty_ledger() {
    let project = project_with_units();
    let db_path = project.path().join("app.duckdb");
    let config = EngineConfig::new(project.path().join("migrations"));

    {
        let db = open(&db_path);
        Engine::new(&db, config.clone()).apply_all().await.unwrap();
    }

    let db = open(&db_path);
    let engine = Engine::new(&db, config);
    let summary = engine.run(Direction::Revert).await.unwrap();

    assert_eq!(summary.direction, Direction::Revert);
    assert_eq!(summary.count(), 3);
    assert_eq!(summary.completed[0], "20240103000000_seed");
    assert!(applied(&db).await.is_empty());
    assert!(!db.relation_exists("users").await.unwrap());
    // Ledger table itself stays
    assert!(db.relation_exists("waypoint_migrations").await.unwrap());
}

#[tokio::test]
async fn test_status_after_partial_apply() {
    let project = project_with_units();
    let migrations = project.path().join("migrations");
    std::fs::write(
        migrations.join("20240103000000_seed_up.sql"),
        "INSERT INTO missing_table VALUES (1);",
    )
    .unwrap();
    let db = DuckDbBackend::in_memory().unwrap();
    let engine = Engine::new(&db, EngineConfig::new(&migrations));

    let err = engine.apply_all().await.unwrap_err();
    assert!(matches!(err.error, EngineError::ScriptExecution { .. }));
    assert_eq!(err.completed.len(), 2);

    let report = engine.status().await.unwrap();
    assert_eq!(report.applied_count(), 2);
    assert_eq!(report.pending_count(), 1);
    assert!(!report.units[2].is_applied());
}
