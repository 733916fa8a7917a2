// Integration tests for the migration framework

use rusqlite::Connection;

fn setup_test_db() -> Connection {
    Connection::open_in_memory().expect("Failed to create in-memory database")
}

fn get_table_names(conn: &Connection) -> Vec<String> {
    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
        .unwrap();
    stmt.query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<Vec<String>, _>>()
        .unwrap()
}

#[test]
fn test_apply_migrations_on_empty_db() {
    // Given: An empty SQLite database
    let mut conn = setup_test_db();

    // When: Migrations are applied
    let result = appdata_store::migrations::apply_migrations(&mut conn);

    // Then: All migrations succeed
    assert!(
        result.is_ok(),
        "Migrations should succeed: {:?}",
        result.err()
    );

    // And: every loaded table plus the bookkeeping tables exist
    let tables = get_table_names(&conn);
    let expected_tables = vec![
        "schema_version",
        "department",
        "package",
        "user_data",
        "asset",
        "stig_asset_map",
        "user_stig_asset_map",
        "review",
        "review_history",
        "stats_asset_stig",
        "load_control",
        "sqlite_sequence", // Auto-created by SQLite for AUTOINCREMENT columns
    ];
    assert_eq!(tables.len(), expected_tables.len(), "{:?}", tables);
    for expected_table in &expected_tables {
        assert!(
            tables.contains(&expected_table.to_string()),
            "Missing table: {}",
            expected_table
        );
    }
}

#[test]
fn test_triggers_installed_and_enabled() {
    let mut conn = setup_test_db();
    appdata_store::migrations::apply_migrations(&mut conn).unwrap();

    let triggers: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'trigger'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(triggers, 3);

    let disabled: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM load_control WHERE triggers_enabled = 0",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(disabled, 0);
}

#[test]
fn test_migrations_survive_reopen() {
    // Given: A file database with migrations applied
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("appdata.db");
    {
        let mut conn = appdata_store::db::open(&path).unwrap();
        appdata_store::migrations::apply_migrations(&mut conn).unwrap();
    }

    // When: It is reopened and migrated again
    let mut conn = appdata_store::db::open(&path).unwrap();
    let applied = appdata_store::migrations::apply_migrations(&mut conn).unwrap();

    // Then: Nothing is re-applied
    assert!(applied.is_empty());
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM schema_version", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 1);
}
